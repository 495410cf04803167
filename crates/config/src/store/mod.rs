//! Flat, mutable configuration store with dotted-prefix queries.
//!
//! Responsibilities:
//! - Hold configuration values under flat string keys.
//! - Answer single-key lookups with required or caller-supplied-default semantics.
//! - Slice dotted-key namespaces into sub-maps on demand.
//!
//! Does NOT handle:
//! - Reading environment variables or env files (see `environment`).
//! - Translating environment values into keys (done by `ConfigBuilder` implementations).
//!
//! Invariants:
//! - Keys are never empty.
//! - `set_all` validates every key before writing any of them.
//! - Values handed out are clones; opaque values share their handle with the store.

mod prefix;


use std::collections::HashMap;

use crate::error::ConfigError;
use crate::types::Value;
use prefix::KeyPrefix;

/// Flat key-value bag for runtime configuration.
#[derive(Debug, Clone, Default)]
pub struct ConfigStore {
    data: HashMap<String, Value>,
}

impl ConfigStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `entries`.
    pub fn from_entries<I, K, V>(entries: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let mut store = Self::new();
        store.set_all(entries)?;
        Ok(store)
    }

    /// Get the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingValue` if the key is not set.
    pub fn get(&self, key: &str) -> Result<&Value, ConfigError> {
        self.data
            .get(key)
            .ok_or_else(|| ConfigError::MissingValue(key.to_string()))
    }

    /// Get the value stored under `key`, or `default` if it is not set.
    ///
    /// The default is returned as-is, including `Value::Null`.
    pub fn get_or(&self, key: &str, default: impl Into<Value>) -> Value {
        match self.data.get(key) {
            Some(value) => value.clone(),
            None => default.into(),
        }
    }

    pub fn has(&self, key: &str) -> bool {
        self.data.contains_key(key)
    }

    /// Insert or overwrite a single value.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if `key` is empty.
    pub fn set(
        &mut self,
        key: impl Into<String>,
        value: impl Into<Value>,
    ) -> Result<&mut Self, ConfigError> {
        let key = validate_key(key.into())?;
        tracing::trace!(key = %key, "Setting config value");
        self.data.insert(key, value.into());
        Ok(self)
    }

    /// Merge `entries` into the store.
    ///
    /// Overlapping keys are overwritten, all other keys are left untouched.
    /// If any key is empty nothing is written.
    pub fn set_all<I, K, V>(&mut self, entries: I) -> Result<&mut Self, ConfigError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        let entries = entries
            .into_iter()
            .map(|(key, value)| Ok((validate_key(key.into())?, value.into())))
            .collect::<Result<Vec<(String, Value)>, ConfigError>>()?;

        tracing::trace!(count = entries.len(), "Merging config values");
        self.data.extend(entries);
        Ok(self)
    }

    /// Returns a copy of every stored key and value.
    pub fn to_map(&self) -> HashMap<String, Value> {
        self.data.clone()
    }

    /// Returns every value below `prefix`, keyed by the remainder of the key.
    ///
    /// `"db"` and `"db."` are equivalent: given `db.host` and `db.port` the
    /// result is `{host, port}`. A key equal to the prefix itself is not part
    /// of the result.
    ///
    /// # Errors
    ///
    /// - `ConfigError::InvalidArgument` if the prefix is empty after stripping
    ///   trailing dots.
    /// - `ConfigError::MissingPrefix` if no key lies below the prefix.
    pub fn get_prefix(&self, prefix: &str) -> Result<HashMap<String, Value>, ConfigError> {
        let prefix = KeyPrefix::parse(prefix)?;

        let results: HashMap<String, Value> = self
            .data
            .iter()
            .filter_map(|(key, value)| {
                prefix
                    .strip(key)
                    .map(|sub_key| (sub_key.to_string(), value.clone()))
            })
            .collect();

        if results.is_empty() {
            return Err(ConfigError::MissingPrefix(prefix.normalized().to_string()));
        }

        Ok(results)
    }

    /// Returns true if at least one key lies below `prefix`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidArgument` if the prefix is empty after
    /// stripping trailing dots.
    pub fn has_prefix(&self, prefix: &str) -> Result<bool, ConfigError> {
        let prefix = KeyPrefix::parse(prefix)?;
        Ok(self.data.keys().any(|key| prefix.matches(key)))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.data.iter().map(|(key, value)| (key.as_str(), value))
    }
}

fn validate_key(key: String) -> Result<String, ConfigError> {
    if key.is_empty() {
        return Err(ConfigError::InvalidArgument(
            "The config key can not be empty".to_string(),
        ));
    }
    Ok(key)
}
