//! Dotted-prefix normalization and matching.
//!
//! Invariants:
//! - Only trailing separators are stripped; consecutive dots elsewhere are kept.
//! - A key matches only if it continues past `prefix + "."`; the bare prefix
//!   itself never matches.

use crate::constants::KEY_SEPARATOR;
use crate::error::ConfigError;

/// A validated prefix with its trailing separator re-attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct KeyPrefix {
    normalized: String,
    needle: String,
}

impl KeyPrefix {
    /// Strip trailing separators and reject an empty result.
    pub(crate) fn parse(prefix: &str) -> Result<Self, ConfigError> {
        let normalized = prefix.trim_end_matches(KEY_SEPARATOR);
        if normalized.is_empty() {
            return Err(ConfigError::InvalidArgument(
                "The key prefix can not be empty".to_string(),
            ));
        }

        let mut needle = String::with_capacity(normalized.len() + 1);
        needle.push_str(normalized);
        needle.push(KEY_SEPARATOR);

        Ok(Self {
            normalized: normalized.to_string(),
            needle,
        })
    }

    pub(crate) fn normalized(&self) -> &str {
        &self.normalized
    }

    /// Returns the sub-key below this prefix, if `key` lies inside it.
    pub(crate) fn strip<'k>(&self, key: &'k str) -> Option<&'k str> {
        key.strip_prefix(self.needle.as_str())
    }

    pub(crate) fn matches(&self, key: &str) -> bool {
        key.starts_with(self.needle.as_str())
    }
}
