//! CLI error types.
//!
//! Argument and configuration problems are reported as [`CliError`];
//! failures from the library layers travel through `anyhow` with context.

use arrears_core::types::ConfigurationError;
use thiserror::Error;

/// Errors raised by the command-line layer itself.
#[derive(Debug, Error)]
pub enum CliError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Configuration file error: {0}")]
    ConfigFile(String),

    #[error("Invalid environment variable {name}={value}: {reason}")]
    InvalidEnv {
        name: &'static str,
        value: String,
        reason: String,
    },

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for configuration and argument handling.
pub type Result<T> = std::result::Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_is_transparent() {
        let err: CliError = ConfigurationError::invalid_parameter("n_paths", 0.0, "must be positive").into();
        assert_eq!(
            err.to_string(),
            "Invalid parameter n_paths = 0: must be positive"
        );
    }

    #[test]
    fn test_invalid_env_message() {
        let err = CliError::InvalidEnv {
            name: "ARREARS_SEED",
            value: "abc".to_string(),
            reason: "invalid digit found in string".to_string(),
        };
        assert!(err.to_string().starts_with("Invalid environment variable ARREARS_SEED=abc"));
    }
}
