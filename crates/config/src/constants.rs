//! Centralized constants for the envbag workspace.
//!
//! This module contains the separator and environment-variable names shared
//! by the store, the resolver and the CLI.

// =============================================================================
// Key Namespaces
// =============================================================================

/// Separator between namespace segments of a dotted key (`db.primary.host`).
pub const KEY_SEPARATOR: char = '.';

// =============================================================================
// Environment Resolution
// =============================================================================

/// Process environment variable that disables env-file parsing when set to
/// `1` or `true`. Only the process environment is used in that case.
pub const DOTENV_DISABLED_VAR: &str = "DOTENV_DISABLED";

/// Env file used when no explicit source path is configured.
pub const DEFAULT_ENV_FILE: &str = ".env";
