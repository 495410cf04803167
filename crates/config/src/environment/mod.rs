//! Environment resolution: env files overlaid with the process environment.
//!
//! Responsibilities:
//! - Define the `EnvironmentLookup` contract that config builders read from.
//! - Provide `EnvironmentResolver`, the lazily loaded, cached implementation.
//! - Provide the `EnvFileSource` collaborator contract and its dotenv implementation.
//!
//! Does NOT handle:
//! - Storing configuration (see `store`).
//!
//! Invariants / Assumptions:
//! - Process environment values take precedence over env file values.
//! - The `DOTENV_DISABLED` variable is checked in the process environment
//!   snapshot before any env file is read.

mod resolver;
mod source;

#[cfg(test)]
mod tests;

pub use resolver::EnvironmentResolver;
pub use source::{DotenvFileSource, EnvFileSource};

use crate::error::ConfigError;
use crate::types::Scalar;

/// Read access to resolved environment values.
pub trait EnvironmentLookup {
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvValue` if the key is not set.
    fn get_value(&self, key: &str) -> Result<Scalar, ConfigError>;

    /// Returns `default` if the key is not set.
    fn get_value_or(&self, key: &str, default: Scalar) -> Result<Scalar, ConfigError>;

    /// Every key in the resolved environment, in no particular order.
    fn keys(&self) -> Result<Vec<String>, ConfigError>;
}
