#![deny(missing_docs)]

//! # CLI Errors
//!
//! Error types for the CLI crate.

use clientgen_core::AppError;
use derive_more::{Display, From};

/// Main error enum for CLI operations.
#[derive(Debug, Display, From)]
pub enum CliError {
    /// Generation failed.
    #[display("{}", _0)]
    #[from]
    App(AppError),

    /// The log subscriber could not be installed.
    #[display("Failed to initialize logging: {}", _0)]
    Logging(String),
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::App(e) => Some(e),
            CliError::Logging(_) => None,
        }
    }
}

/// Result type alias.
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_error_passes_through() {
        let err: CliError = AppError::UnsupportedVersion("2.0".into()).into();
        assert_eq!(
            err.to_string(),
            "Unsupported OpenAPI version: 2.0 (expected 3.0.x)"
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
