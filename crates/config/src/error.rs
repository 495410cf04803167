//! Error types for the configuration store and environment resolution.
//!
//! Responsibilities:
//! - Define error variants for store lookups, prefix queries and env resolution.
//! - Map `dotenvy` failures to variants that carry the offending path.
//!
//! Does NOT handle:
//! - Exit-code mapping for the command line (see the CLI crate).
//!
//! Invariants:
//! - `MissingValue` / `MissingPrefix` / `MissingEnvValue` always name the
//!   requested key, prefix or variable.
//! - Dotenv errors NEVER include raw env-file line contents to prevent secret leakage.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised by [`ConfigStore`](crate::ConfigStore) and
/// [`EnvironmentResolver`](crate::EnvironmentResolver).
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A config key or prefix was requested without a default and is not set.
    #[error("The config key '{0}' doesn't exist")]
    MissingValue(String),

    /// A prefix was queried with `get_prefix` but no key lies below it.
    #[error("The config key prefix {0} doesn't exist")]
    MissingPrefix(String),

    /// An environment value was requested without a default and is not set.
    #[error("The environment value {0} was requested, but it was not set")]
    MissingEnvValue(String),

    /// Programmer misuse: empty key or prefix, or no source paths.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// A value is present but could not be converted to the requested type.
    #[error("Invalid value for {var}: {message}")]
    InvalidValue { var: String, message: String },

    /// Failed to parse an env file due to invalid syntax.
    ///
    /// SAFETY: This error only includes the byte index of the parse failure,
    /// NOT the offending line content, to prevent leaking secrets.
    #[error(
        "Failed to parse env file {} at position {error_index}. Hint: set DOTENV_DISABLED=1 to skip env file loading",
        .path.display()
    )]
    DotenvParse { path: PathBuf, error_index: usize },

    /// Failed to read an env file due to an I/O error.
    #[error("Failed to read env file {}: {kind}", .path.display())]
    DotenvIo { path: PathBuf, kind: ErrorKind },

    /// Unknown dotenv error (future variants from dotenvy crate).
    ///
    /// SAFETY: This error does not include any raw dotenv content.
    #[error(
        "Failed to load env file {}. Hint: set DOTENV_DISABLED=1 to skip env file loading",
        .path.display()
    )]
    DotenvUnknown { path: PathBuf },
}

impl ConfigError {
    /// Returns true for the "requested but absent" family of errors, which
    /// callers avoid by supplying a default.
    pub fn is_missing(&self) -> bool {
        matches!(
            self,
            ConfigError::MissingValue(_)
                | ConfigError::MissingPrefix(_)
                | ConfigError::MissingEnvValue(_)
        )
    }

    pub(crate) fn from_dotenv(path: &Path, error: dotenvy::Error) -> Self {
        match error {
            dotenvy::Error::LineParse(_, idx) => ConfigError::DotenvParse {
                path: path.to_path_buf(),
                error_index: idx,
            },
            dotenvy::Error::Io(io_err) => ConfigError::DotenvIo {
                path: path.to_path_buf(),
                kind: io_err.kind(),
            },
            _ => ConfigError::DotenvUnknown {
                path: path.to_path_buf(),
            },
        }
    }
}
