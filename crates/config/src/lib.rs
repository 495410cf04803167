//! Runtime configuration store for envbag.
//!
//! This crate provides a flat, dotted-key configuration store and a resolver
//! that merges env files with the process environment, loading them lazily
//! and exactly once.

pub mod builder;
pub mod constants;
pub mod environment;
mod error;
pub mod store;
pub mod types;

pub use builder::{ConfigBuilder, build_store};
pub use environment::{DotenvFileSource, EnvFileSource, EnvironmentLookup, EnvironmentResolver};
pub use error::ConfigError;
pub use store::ConfigStore;
pub use types::{OpaqueValue, Scalar, Value};
