//! # Error Handling
//!
//! Provides the unified `AppError` enum used across the workspace.
//!
//! Variants are grouped by pipeline stage (load, resolution, render, write) so
//! callers can tell a bad input document apart from a bug in the generator.

use derive_more::{Display, From};
use std::path::PathBuf;

/// The Global Error Enum.
#[derive(Debug, Display, From)]
pub enum AppError {
    /// The OpenAPI document (or a template override) could not be read from disk.
    #[display("Failed to read {}: {source}", path.display())]
    Read {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The document is not valid YAML/JSON or not a structurally valid OpenAPI document.
    #[display("Failed to parse OpenAPI document {}: {message}", path.display())]
    Parse {
        /// Origin of the document (`<memory>` for in-memory input).
        path: PathBuf,
        /// Parser message.
        message: String,
    },

    /// Only OpenAPI 3.0.x documents are accepted.
    #[display("Unsupported OpenAPI version: {_0} (expected 3.0.x)")]
    UnsupportedVersion(String),

    /// A schema or response node was absent where one was required.
    #[display("Failed to resolve '{name}': {reason}")]
    Resolution {
        /// Top-level name being resolved.
        name: String,
        /// What was missing.
        reason: String,
    },

    /// A `$ref` pointed at a component that does not exist.
    #[display("Broken reference: {_0}")]
    BrokenReference(String),

    /// Every generated client method needs a name.
    #[display("Operation {method} {path} has no operationId")]
    MissingOperationId {
        /// HTTP method of the operation.
        method: String,
        /// Path template of the operation.
        path: String,
    },

    /// The raw document has no ordered keys for a section the typed model reports as populated.
    #[display("Cannot determine declaration order of '{_0}'")]
    MissingOrderingKeys(String),

    /// Template parsing or execution failed.
    #[display("Template Error: {_0}")]
    Template(String),

    /// The rendered text is not valid Rust.
    #[display("Generated code is not valid Rust: {_0}")]
    Format(String),

    /// Writing generated output failed.
    #[display("Failed to write {}: {source}", path.display())]
    Write {
        /// Target file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Wrapper for standard IO errors.
    #[from]
    #[display("IO Error: {_0}")]
    Io(std::io::Error),
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Read { source, .. } | AppError::Write { source, .. } => Some(source),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

/// Helper type alias for Result using AppError.
pub type AppResult<T> = Result<T, AppError>;
