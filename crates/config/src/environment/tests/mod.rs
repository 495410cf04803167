//! Tests for environment resolution.
//!
//! Invariants:
//! - Tests that read the real process environment use `serial_test` and
//!   `temp_env` so they cannot observe each other's variables.
//! - Env files live in `tempfile` directories and are cleaned up automatically.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::ConfigError;
use crate::types::Scalar;


type LoadResult = Result<HashMap<String, Scalar>, ConfigError>;

/// A file source returning fixed values and counting its invocations.
#[derive(Clone)]
pub struct CountingSource {
    values: HashMap<String, Scalar>,
    calls: Arc<AtomicUsize>,
    seen_paths: Arc<std::sync::Mutex<Vec<PathBuf>>>,
}

impl CountingSource {
    pub fn new<I, K>(values: I) -> Self
    where
        I: IntoIterator<Item = (K, Scalar)>,
        K: Into<String>,
    {
        Self {
            values: values.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            calls: Arc::new(AtomicUsize::new(0)),
            seen_paths: Arc::new(std::sync::Mutex::new(Vec::new())),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn seen_paths(&self) -> Vec<PathBuf> {
        self.seen_paths.lock().unwrap().clone()
    }
}

impl super::EnvFileSource for CountingSource {
    fn load(&self, paths: &[PathBuf]) -> LoadResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_paths.lock().unwrap().extend_from_slice(paths);
        Ok(self.values.clone())
    }
}
