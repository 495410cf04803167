//! envbag - inspect layered environment configuration from the command line.
//!
//! Responsibilities:
//! - Parse command-line arguments and environment variables.
//! - Initialize logging.
//! - Run the selected command and map failures to structured exit codes.
//!
//! Does NOT handle:
//! - Environment resolution or store semantics (see `crates/config`).
//!
//! Invariants:
//! - Logs go to stderr; stdout carries only command output.

mod args;
mod builder;
mod commands;
mod error;

use args::Cli;
use clap::Parser;
use commands::run_command;
use error::{ExitCode, ExitCodeExt};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    let code = match run_command(&cli, &mut out) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            e.exit_code()
        }
    };

    std::process::exit(code.as_i32());
}
