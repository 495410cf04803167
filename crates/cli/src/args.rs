//! CLI argument definitions and parsing.
//!
//! Responsibilities:
//! - Define the CLI structure using clap derive macros.
//! - Parse `--set KEY=VALUE` overrides.
//!
//! Non-responsibilities:
//! - Does not resolve the environment or build the store (see `commands`).

use clap::{Parser, Subcommand, ValueEnum};
use envbag_config::Value;
use envbag_config::constants::DEFAULT_ENV_FILE;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "envbag")]
#[command(about = "Resolve env files and the process environment into a dotted-key config", long_about = None)]
#[command(version)]
#[command(
    after_help = "Examples:\n  envbag --env-file .env --env-file .env.local list\n  envbag --env-prefix APP_ prefix db\n  envbag --set feature.beta=true get feature.beta\n  envbag env DATABASE_URL --default sqlite::memory:\n"
)]
pub struct Cli {
    /// Env file to read; repeat to layer files, later files win
    #[arg(
        long = "env-file",
        global = true,
        env = "ENVBAG_ENV_FILES",
        value_delimiter = ',',
        default_value = DEFAULT_ENV_FILE,
        value_name = "FILE"
    )]
    pub env_files: Vec<PathBuf>,

    /// Only import environment keys starting with this prefix (prefix is stripped)
    #[arg(long, global = true, env = "ENVBAG_ENV_PREFIX")]
    pub env_prefix: Option<String>,

    /// Read true/false/null and numbers in env files as typed values
    #[arg(long, global = true)]
    pub typed_literals: bool,

    /// Override a config key after the environment is applied (VALUE is JSON or a plain string)
    #[arg(long = "set", global = true, value_name = "KEY=VALUE", value_parser = parse_override)]
    pub overrides: Vec<(String, Value)>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the value of a config key
    Get {
        key: String,
        /// Value to print when the key is not set (JSON or a plain string)
        #[arg(long, value_parser = parse_value)]
        default: Option<Value>,
    },
    /// Report whether a config key is set
    Has { key: String },
    /// Print every key below a dotted prefix, with the prefix removed
    Prefix { prefix: String },
    /// Report whether any key lies below a dotted prefix
    HasPrefix { prefix: String },
    /// Print every config key and value
    List,
    /// Print a raw value from the resolved environment
    Env {
        key: String,
        /// Value to print when the variable is not set
        #[arg(long)]
        default: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Parse a value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> Result<Value, String> {
    Ok(serde_json::from_str::<serde_json::Value>(raw)
        .map(Value::from)
        .unwrap_or_else(|_| Value::from(raw)))
}

fn parse_override(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected KEY=VALUE, got '{}'", raw))?;
    if key.is_empty() {
        return Err("the key can not be empty".to_string());
    }
    Ok((key.to_string(), parse_value(value)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_prefers_json() {
        assert_eq!(parse_value("42").unwrap(), Value::Int(42));
        assert_eq!(parse_value("true").unwrap(), Value::Bool(true));
        assert_eq!(parse_value("null").unwrap(), Value::Null);
        assert_eq!(parse_value("\"quoted\"").unwrap(), Value::from("quoted"));
        assert_eq!(parse_value("plain text").unwrap(), Value::from("plain text"));
    }

    #[test]
    fn test_parse_override() {
        let (key, value) = parse_override("db.port=5432").unwrap();
        assert_eq!(key, "db.port");
        assert_eq!(value, Value::Int(5432));

        let (key, value) = parse_override("url=postgres://h/db?a=b").unwrap();
        assert_eq!(key, "url");
        assert_eq!(value, Value::from("postgres://h/db?a=b"));

        assert!(parse_override("novalue").is_err());
        assert!(parse_override("=1").is_err());
    }

    #[test]
    fn test_cli_defaults_to_dot_env() {
        let cli = Cli::try_parse_from(["envbag", "list"]).unwrap();
        assert_eq!(cli.env_files, vec![PathBuf::from(".env")]);
        assert_eq!(cli.output, OutputFormat::Text);
        assert!(!cli.typed_literals);
    }

    #[test]
    fn test_cli_collects_repeated_flags() {
        let cli = Cli::try_parse_from([
            "envbag",
            "--env-file",
            "a.env",
            "--env-file",
            "b.env",
            "--set",
            "x=1",
            "--set",
            "y=two",
            "-o",
            "json",
            "get",
            "x",
        ])
        .unwrap();

        assert_eq!(
            cli.env_files,
            vec![PathBuf::from("a.env"), PathBuf::from("b.env")]
        );
        assert_eq!(cli.overrides.len(), 2);
        assert_eq!(cli.output, OutputFormat::Json);
        assert!(matches!(cli.command, Commands::Get { ref key, default: None } if key == "x"));
    }
}
