//! Integration tests for resolving an environment into a configuration store.
//!
//! These tests drive the public API the way an application would at startup:
//! env files on disk, an injected process environment, a builder, then
//! prefix queries against the resulting store.

use std::fs;
use std::path::PathBuf;

use envbag_config::{
    ConfigBuilder, ConfigError, ConfigStore, EnvironmentLookup, EnvironmentResolver, Scalar,
    Value, build_store,
};
use tempfile::TempDir;

struct AppBuilder;

impl ConfigBuilder for AppBuilder {
    fn build(
        &self,
        env: &dyn EnvironmentLookup,
        config: &mut ConfigStore,
    ) -> Result<(), ConfigError> {
        config
            .set("db.host", env.get_value("DB_HOST")?)?
            .set("db.port", env.get_value_or("DB_PORT", Scalar::from("5432"))?)?
            .set("cache.ttl", env.get_value_or("CACHE_TTL", Scalar::Null)?)?;
        Ok(())
    }
}

fn env_files(dir: &TempDir) -> Vec<PathBuf> {
    let base = dir.path().join(".env");
    let local = dir.path().join(".env.local");
    fs::write(&base, "DB_HOST=db.internal\nDB_PORT=5432\n").unwrap();
    fs::write(&local, "DB_PORT=6432\n").unwrap();
    vec![base, local]
}

#[test]
fn test_resolver_builder_and_prefix_queries() {
    let temp_dir = TempDir::new().unwrap();
    let env = EnvironmentResolver::new(env_files(&temp_dir))
        .unwrap()
        .with_process_env([("DB_HOST", "db.override")]);

    let mut config = build_store(&env, &[&AppBuilder]).unwrap();
    config.set("app.name", "envbag").unwrap();

    let db = config.get_prefix("db").unwrap();
    assert_eq!(db.len(), 2);
    assert_eq!(db.get("host"), Some(&Value::from("db.override")));
    assert_eq!(db.get("port"), Some(&Value::from("6432")));

    assert_eq!(config.get("cache.ttl").unwrap(), &Value::Null);
    assert!(config.has_prefix("app").unwrap());
    assert!(!config.has_prefix("app.name").unwrap());
    assert!(matches!(
        config.get_prefix("queue"),
        Err(ConfigError::MissingPrefix(_))
    ));
}

#[test]
fn test_missing_required_env_value_stops_the_build() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(".env");
    fs::write(&path, "DB_PORT=5432\n").unwrap();

    let env = EnvironmentResolver::new([path])
        .unwrap()
        .with_process_env(Vec::<(String, String)>::new());

    let err = build_store(&env, &[&AppBuilder]).unwrap_err();
    assert!(err.is_missing());
    assert!(err.to_string().contains("DB_HOST"));
}

#[test]
fn test_empty_prefix_is_a_programmer_error() {
    let config = ConfigStore::new();
    assert!(matches!(
        config.get_prefix("."),
        Err(ConfigError::InvalidArgument(_))
    ));
    assert!(matches!(
        EnvironmentResolver::new(Vec::<PathBuf>::new()),
        Err(ConfigError::InvalidArgument(_))
    ));
}
