//! Contract for code that populates a store from the environment.

use crate::environment::EnvironmentLookup;
use crate::error::ConfigError;
use crate::store::ConfigStore;

/// Translates environment values into `ConfigStore` writes at startup.
///
/// Implementations typically call `env.get_value` for required keys, letting
/// `ConfigError::MissingEnvValue` propagate, and `env.get_value_or` for
/// optional ones.
pub trait ConfigBuilder {
    fn build(&self, env: &dyn EnvironmentLookup, config: &mut ConfigStore)
    -> Result<(), ConfigError>;
}

/// Run `builders` in order against a fresh store.
///
/// Later builders overwrite keys written by earlier ones.
pub fn build_store(
    env: &dyn EnvironmentLookup,
    builders: &[&dyn ConfigBuilder],
) -> Result<ConfigStore, ConfigError> {
    let mut config = ConfigStore::new();
    for builder in builders {
        builder.build(env, &mut config)?;
    }
    tracing::debug!(
        builders = builders.len(),
        keys = config.len(),
        "Built config store"
    );
    Ok(config)
}
