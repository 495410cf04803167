//! Shared test utilities for envbag integration tests.
//!
//! Invariants / Assumptions:
//! - Commands start from an empty environment so host variables never leak in.
//! - Env files are written into a `TempDir` that also serves as working directory.

use assert_cmd::Command;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Returns a hermetic `envbag` command running inside `dir`.
pub fn envbag_cmd(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("envbag");
    cmd.env_clear().current_dir(dir.path());
    cmd
}

/// Write an env file into `dir` and return its path.
#[allow(dead_code)]
pub fn write_env(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, contents).unwrap();
    path
}
