//! File-backed environment sources.
//!
//! Responsibilities:
//! - Define the `EnvFileSource` contract consumed by the resolver.
//! - Provide `DotenvFileSource`, which parses `.env`-style files with `dotenvy`.
//!
//! Does NOT handle:
//! - Merging with the process environment (see `resolver.rs`).
//! - Caching; sources are called at most once per resolver.
//!
//! Invariants:
//! - Paths are read in order; a key in a later file overrides an earlier one.
//! - Dotenv errors NEVER include raw line contents.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::types::Scalar;

/// Turns an ordered list of source paths into one flat map.
///
/// Returning an empty map is valid.
pub trait EnvFileSource: Send + Sync {
    fn load(&self, paths: &[PathBuf]) -> Result<HashMap<String, Scalar>, ConfigError>;
}

impl<F> EnvFileSource for F
where
    F: Fn(&[PathBuf]) -> Result<HashMap<String, Scalar>, ConfigError> + Send + Sync,
{
    fn load(&self, paths: &[PathBuf]) -> Result<HashMap<String, Scalar>, ConfigError> {
        self(paths)
    }
}

/// Reads `KEY=value` env files with `dotenvy`.
///
/// Missing files are skipped unless the source is built with
/// [`DotenvFileSource::strict`]. Values are strings unless
/// [`DotenvFileSource::with_typed_literals`] is set.
#[derive(Debug, Clone, Copy, Default)]
pub struct DotenvFileSource {
    require_existing: bool,
    typed_literals: bool,
}

impl DotenvFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// A source that fails with `ConfigError::DotenvIo` on missing files.
    pub fn strict() -> Self {
        Self {
            require_existing: true,
            ..Self::default()
        }
    }

    /// Read `true`, `false`, `null` and numbers as typed scalars.
    ///
    /// Quoting does not survive parsing, so `"5432"` and `5432` both become
    /// `Scalar::Int(5432)`.
    pub fn with_typed_literals(self) -> Self {
        Self {
            typed_literals: true,
            ..self
        }
    }

    fn scalar(&self, value: String) -> Scalar {
        if self.typed_literals {
            Scalar::from_literal(value)
        } else {
            Scalar::String(value)
        }
    }

    fn load_file(
        &self,
        path: &Path,
        merged: &mut HashMap<String, Scalar>,
    ) -> Result<(), ConfigError> {
        let iter = match dotenvy::from_path_iter(path) {
            Ok(iter) => iter,
            Err(e) if !self.require_existing && is_not_found(&e) => {
                tracing::debug!(path = %path.display(), "Env file not found, skipping");
                return Ok(());
            }
            Err(e) => return Err(ConfigError::from_dotenv(path, e)),
        };

        let mut count = 0usize;
        for item in iter {
            let (key, value) = item.map_err(|e| ConfigError::from_dotenv(path, e))?;
            merged.insert(key, self.scalar(value));
            count += 1;
        }

        tracing::debug!(path = %path.display(), keys = count, "Loaded env file");
        Ok(())
    }
}

impl EnvFileSource for DotenvFileSource {
    fn load(&self, paths: &[PathBuf]) -> Result<HashMap<String, Scalar>, ConfigError> {
        let mut merged = HashMap::new();
        for path in paths {
            self.load_file(path, &mut merged)?;
        }
        Ok(merged)
    }
}

/// Check if a dotenv error indicates the file was not found.
fn is_not_found(err: &dotenvy::Error) -> bool {
    matches!(
        err,
        dotenvy::Error::Io(io_err) if io_err.kind() == std::io::ErrorKind::NotFound
    )
}
