//! CLI exit codes for scripting and automation.
//!
//! Responsibilities:
//! - Define structured exit codes that scripts can use to distinguish error types.
//! - Map ConfigError variants to appropriate exit codes.
//!
//! Does NOT handle:
//! - Error message formatting (handled by anyhow Display).
//!
//! Invariants:
//! - Exit codes 1-9 are reserved for specific error categories.

use envbag_config::ConfigError;

/// Structured exit codes for envbag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Success - command completed successfully.
    Success = 0,

    /// General error - unreadable env files or any other failure.
    GeneralError = 1,

    /// Missing value - a key, prefix or env value was requested without a default.
    ///
    /// Scripts should supply `--default` or check with `has` first.
    MissingValue = 4,

    /// Validation error - empty prefix, empty key, unparsable value.
    ///
    /// Scripts should fix the input and not retry the same command.
    ValidationError = 5,
}

impl ExitCode {
    /// Convert the exit code to an i32 for use with std::process::exit().
    pub const fn as_i32(self) -> i32 {
        self as u8 as i32
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::MissingValue(_)
            | ConfigError::MissingPrefix(_)
            | ConfigError::MissingEnvValue(_) => {
                ExitCode::MissingValue
            }
            ConfigError::InvalidArgument(_) | ConfigError::InvalidValue { .. } => {
                ExitCode::ValidationError
            }
            ConfigError::DotenvParse { .. }
            | ConfigError::DotenvIo { .. }
            | ConfigError::DotenvUnknown { .. } => ExitCode::GeneralError,
        }
    }
}

/// Extension trait for anyhow::Error to extract exit codes.
pub trait ExitCodeExt {
    /// Returns ExitCode::GeneralError if no ConfigError is in the chain.
    fn exit_code(&self) -> ExitCode;
}

impl ExitCodeExt for anyhow::Error {
    fn exit_code(&self) -> ExitCode {
        self.chain()
            .find_map(|cause| cause.downcast_ref::<ConfigError>())
            .map_or(ExitCode::GeneralError, ExitCode::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_exit_code_as_i32() {
        assert_eq!(ExitCode::Success.as_i32(), 0);
        assert_eq!(ExitCode::GeneralError.as_i32(), 1);
        assert_eq!(ExitCode::MissingValue.as_i32(), 4);
        assert_eq!(ExitCode::ValidationError.as_i32(), 5);
    }

    #[test]
    fn test_config_error_mapping() {
        assert_eq!(
            ExitCode::from(&ConfigError::MissingValue("a".into())),
            ExitCode::MissingValue
        );
        assert_eq!(
            ExitCode::from(&ConfigError::MissingPrefix("db".into())),
            ExitCode::MissingValue
        );
        assert_eq!(
            ExitCode::from(&ConfigError::MissingEnvValue("A".into())),
            ExitCode::MissingValue
        );
        assert_eq!(
            ExitCode::from(&ConfigError::InvalidArgument("empty".into())),
            ExitCode::ValidationError
        );
        assert_eq!(
            ExitCode::from(&ConfigError::DotenvUnknown {
                path: ".env".into()
            }),
            ExitCode::GeneralError
        );
    }

    #[test]
    fn test_exit_code_found_through_context() {
        let result: Result<(), ConfigError> = Err(ConfigError::MissingPrefix("db".into()));
        let err = result.context("Failed to read prefix").unwrap_err();
        assert_eq!(err.exit_code(), ExitCode::MissingValue);

        let plain = anyhow::anyhow!("something else");
        assert_eq!(plain.exit_code(), ExitCode::GeneralError);
    }
}
