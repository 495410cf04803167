//! Lazily merged view over env files and the process environment.
//!
//! Responsibilities:
//! - Hold the ordered source paths and a snapshot of the process environment.
//! - Build the merged view on first lookup and cache it for the resolver's lifetime.
//! - Answer lookups with required, defaulted and caller-parsed semantics.
//!
//! Does NOT handle:
//! - Parsing env files (delegated to an `EnvFileSource`).
//! - Writing into a `ConfigStore` (done by `ConfigBuilder` implementations).
//!
//! Invariants:
//! - Process environment values override file values, whatever the file order.
//! - The file source is called at most once per successful load; the cached
//!   view is never rebuilt or mutated afterwards.
//! - Concurrent first lookups converge on a single load.
//! - A failed load leaves the resolver unloaded; the next lookup retries.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::{Mutex, OnceLock};

use super::EnvironmentLookup;
use super::source::{DotenvFileSource, EnvFileSource};
use crate::constants::DOTENV_DISABLED_VAR;
use crate::error::ConfigError;
use crate::types::Scalar;

/// Resolves environment values from env files overlaid with the process environment.
pub struct EnvironmentResolver {
    paths: Vec<PathBuf>,
    process_env: HashMap<String, String>,
    source: Box<dyn EnvFileSource>,
    cache: OnceLock<HashMap<String, Scalar>>,
    load_lock: Mutex<()>,
}

impl fmt::Debug for EnvironmentResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Never print values.
        f.debug_struct("EnvironmentResolver")
            .field("paths", &self.paths)
            .field("process_env_keys", &self.process_env.len())
            .field("loaded", &self.is_loaded())
            .finish()
    }
}

impl EnvironmentResolver {
    /// Create a resolver over `paths`, snapshotting the current process environment.
    ///
    /// Env files are parsed with [`DotenvFileSource`] on first lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `paths` is empty.
    pub fn new<I, P>(paths: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        let paths: Vec<PathBuf> = paths.into_iter().map(Into::into).collect();
        if paths.is_empty() {
            return Err(ConfigError::InvalidArgument(
                "No paths specified".to_string(),
            ));
        }

        Ok(Self {
            paths,
            process_env: process_env_snapshot(),
            source: Box::new(DotenvFileSource::new()),
            cache: OnceLock::new(),
            load_lock: Mutex::new(()),
        })
    }

    /// Replace the process environment snapshot.
    ///
    /// The returned resolver has not loaded anything yet.
    pub fn with_process_env<I, K, V>(self, env: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            process_env: env
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            cache: OnceLock::new(),
            ..self
        }
    }

    /// Replace the file source collaborator.
    ///
    /// The returned resolver has not loaded anything yet.
    pub fn with_file_source(self, source: impl EnvFileSource + 'static) -> Self {
        Self {
            source: Box::new(source),
            cache: OnceLock::new(),
            ..self
        }
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Returns true once the merged view has been built.
    pub fn is_loaded(&self) -> bool {
        self.cache.get().is_some()
    }

    /// Get the value for `key`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingEnvValue` if no source sets the key.
    /// - Any error raised by the file source on first load.
    pub fn get_value(&self, key: &str) -> Result<Scalar, ConfigError> {
        self.merged_view()?
            .get(key)
            .cloned()
            .ok_or_else(|| ConfigError::MissingEnvValue(key.to_string()))
    }

    /// Get the value for `key`, or `default` if no source sets it.
    ///
    /// The default is returned as-is, including `Scalar::Null`, `false`, `0`
    /// and `""`.
    pub fn get_value_or(
        &self,
        key: &str,
        default: impl Into<Scalar>,
    ) -> Result<Scalar, ConfigError> {
        Ok(self
            .merged_view()?
            .get(key)
            .cloned()
            .unwrap_or_else(|| default.into()))
    }

    /// Get the value for `key` parsed as `T`.
    ///
    /// # Errors
    ///
    /// - `ConfigError::MissingEnvValue` if no source sets the key.
    /// - `ConfigError::InvalidValue` if the value does not parse.
    pub fn get_parsed<T>(&self, key: &str) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        let value = self.get_value(key)?;
        parse_scalar(key, &value)
    }

    /// Get the value for `key` parsed as `T`, or `default` if no source sets it.
    ///
    /// A value that is present but does not parse is still an error.
    pub fn get_parsed_or<T>(&self, key: &str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match self.merged_view()?.get(key) {
            Some(value) => parse_scalar(key, value),
            None => Ok(default),
        }
    }

    /// The merged view, loading it on first access.
    pub fn merged_view(&self) -> Result<&HashMap<String, Scalar>, ConfigError> {
        if let Some(data) = self.cache.get() {
            return Ok(data);
        }

        let _guard = self
            .load_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        // Another caller may have finished the load while we waited.
        if let Some(data) = self.cache.get() {
            return Ok(data);
        }

        let data = self.load()?;
        Ok(self.cache.get_or_init(|| data))
    }

    fn load(&self) -> Result<HashMap<String, Scalar>, ConfigError> {
        let mut merged = if self.dotenv_disabled() {
            tracing::debug!("{} is set, skipping env files", DOTENV_DISABLED_VAR);
            HashMap::new()
        } else {
            self.source.load(&self.paths)?
        };
        let file_keys = merged.len();

        merged.extend(
            self.process_env
                .iter()
                .map(|(k, v)| (k.clone(), Scalar::String(v.clone()))),
        );

        tracing::debug!(
            paths = self.paths.len(),
            file_keys,
            env_keys = self.process_env.len(),
            merged_keys = merged.len(),
            "Resolved environment"
        );
        Ok(merged)
    }

    /// Check if env file loading is disabled in the process environment snapshot.
    fn dotenv_disabled(&self) -> bool {
        matches!(
            self.process_env.get(DOTENV_DISABLED_VAR).map(String::as_str),
            Some("true") | Some("1")
        )
    }
}

impl EnvironmentLookup for EnvironmentResolver {
    fn get_value(&self, key: &str) -> Result<Scalar, ConfigError> {
        EnvironmentResolver::get_value(self, key)
    }

    fn get_value_or(&self, key: &str, default: Scalar) -> Result<Scalar, ConfigError> {
        EnvironmentResolver::get_value_or(self, key, default)
    }

    fn keys(&self) -> Result<Vec<String>, ConfigError> {
        Ok(self.merged_view()?.keys().cloned().collect())
    }
}

/// Snapshot the process environment, skipping entries that are not valid UTF-8.
fn process_env_snapshot() -> HashMap<String, String> {
    std::env::vars_os()
        .filter_map(|(k, v)| Some((k.into_string().ok()?, v.into_string().ok()?)))
        .collect()
}

fn parse_scalar<T>(key: &str, value: &Scalar) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    value.parse().map_err(|message| ConfigError::InvalidValue {
        var: key.to_string(),
        message,
    })
}
