//! Maps environment variable names onto dotted config keys.
//!
//! `DB__PRIMARY__HOST` becomes `db.primary.host`: names are lower-cased and
//! every `__` turns into a namespace separator. Names are imported in sorted
//! order, so when two names differ only in case (`DB__HOST`, `db__host`) the
//! one that sorts last wins on every run.

use envbag_config::{ConfigBuilder, ConfigError, ConfigStore, EnvironmentLookup, Value};

/// Imports the whole resolved environment, optionally filtered by a name prefix.
#[derive(Debug, Default)]
pub struct DottedKeyBuilder {
    env_prefix: Option<String>,
}

impl DottedKeyBuilder {
    pub fn new(env_prefix: Option<String>) -> Self {
        Self {
            env_prefix: env_prefix.filter(|p| !p.is_empty()),
        }
    }

    /// Returns the config key for an env name, or `None` if the name is
    /// filtered out or maps to an empty key.
    pub fn config_key(&self, env_key: &str) -> Option<String> {
        let name = match &self.env_prefix {
            Some(prefix) => env_key.strip_prefix(prefix.as_str())?,
            None => env_key,
        };
        let key = name.to_lowercase().replace("__", ".");
        (!key.is_empty()).then_some(key)
    }
}

impl ConfigBuilder for DottedKeyBuilder {
    fn build(
        &self,
        env: &dyn EnvironmentLookup,
        config: &mut ConfigStore,
    ) -> Result<(), ConfigError> {
        let mut env_keys = env.keys()?;
        env_keys.sort_unstable();

        let mut entries = Vec::new();
        for env_key in env_keys {
            if let Some(key) = self.config_key(&env_key) {
                entries.push((key, Value::from(env.get_value(&env_key)?)));
            }
        }

        tracing::debug!(
            imported = entries.len(),
            prefix = ?self.env_prefix,
            "Imported environment into config"
        );
        config.set_all(entries)?;
        Ok(())
    }
}
