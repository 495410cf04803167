//! Command execution.
//!
//! Responsibilities:
//! - Resolve the environment and build the config store for every command.
//! - Execute the selected query and write its result.
//!
//! Invariants:
//! - `--set` overrides are applied after the environment, so they always win.
//! - Text output of maps is sorted by key; JSON output is an object.

use anyhow::{Context, Result};
use envbag_config::{
    ConfigStore, DotenvFileSource, EnvironmentResolver, Scalar, Value, build_store,
};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};
use std::io::Write;

use crate::args::{Cli, Commands, OutputFormat};
use crate::builder::DottedKeyBuilder;

/// Build the store described by the global options.
pub fn load_store(cli: &Cli, env: &EnvironmentResolver) -> Result<ConfigStore> {
    let builder = DottedKeyBuilder::new(cli.env_prefix.clone());
    let mut store = build_store(env, &[&builder]).context("Failed to build configuration")?;
    store
        .set_all(cli.overrides.iter().cloned())
        .context("Failed to apply --set overrides")?;
    Ok(store)
}

/// Build the resolver described by the global options, snapshotting the host
/// process environment.
pub fn resolver(cli: &Cli) -> Result<EnvironmentResolver> {
    let source = if cli.typed_literals {
        DotenvFileSource::new().with_typed_literals()
    } else {
        DotenvFileSource::new()
    };
    let env = EnvironmentResolver::new(cli.env_files.clone())
        .context("Failed to create environment resolver")?
        .with_file_source(source);
    Ok(env)
}

/// Run the selected command against the host process environment.
pub fn run_command(cli: &Cli, out: &mut dyn Write) -> Result<()> {
    run_command_with(cli, &resolver(cli)?, out)
}

/// Run the selected command against an already configured resolver.
pub fn run_command_with(
    cli: &Cli,
    env: &EnvironmentResolver,
    out: &mut dyn Write,
) -> Result<()> {
    tracing::debug!(paths = ?env.paths(), "Resolving environment");

    let store = || load_store(cli, env);

    match &cli.command {
        Commands::Get { key, default } => {
            let store = store()?;
            let value = match default {
                Some(default) => store.get_or(key, default.clone()),
                None => store.get(key)?.clone(),
            };
            write_value(out, cli.output, &value)
        }
        Commands::Has { key } => write_bool(out, cli.output, store()?.has(key)),
        Commands::Prefix { prefix } => {
            let values = store()?
                .get_prefix(prefix)
                .with_context(|| format!("Failed to read prefix '{}'", prefix))?;
            write_map(out, cli.output, values)
        }
        Commands::HasPrefix { prefix } => {
            write_bool(out, cli.output, store()?.has_prefix(prefix)?)
        }
        Commands::List => write_map(out, cli.output, store()?.to_map()),
        Commands::Env { key, default } => {
            let value = match default {
                Some(default) => env.get_value_or(key, Scalar::from(default.as_str()))?,
                None => env.get_value(key)?,
            };
            write_scalar(out, cli.output, &value)
        }
    }
}

fn write_json<T: Serialize + ?Sized>(out: &mut dyn Write, value: &T) -> Result<()> {
    serde_json::to_writer(&mut *out, value).context("Failed to serialize output")?;
    writeln!(out)?;
    Ok(())
}

fn write_value(out: &mut dyn Write, format: OutputFormat, value: &Value) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", value)?,
        OutputFormat::Json => write_json(out, value)?,
    }
    Ok(())
}

fn write_scalar(out: &mut dyn Write, format: OutputFormat, value: &Scalar) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", value)?,
        OutputFormat::Json => write_json(out, value)?,
    }
    Ok(())
}

fn write_bool(out: &mut dyn Write, format: OutputFormat, value: bool) -> Result<()> {
    match format {
        OutputFormat::Text => writeln!(out, "{}", value)?,
        OutputFormat::Json => write_json(out, &value)?,
    }
    Ok(())
}

fn write_map(out: &mut dyn Write, format: OutputFormat, values: HashMap<String, Value>) -> Result<()> {
    let sorted: BTreeMap<String, Value> = values.into_iter().collect();
    match format {
        OutputFormat::Text => {
            for (key, value) in &sorted {
                writeln!(out, "{}={}", key, value)?;
            }
        }
        OutputFormat::Json => write_json(out, &sorted)?,
    }
    Ok(())
}
