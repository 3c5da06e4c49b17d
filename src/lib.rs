#![deny(missing_docs)]

//! # OpenAPI Clientgen
//!
//! Generates a Rust types file and a typed HTTP client from an OpenAPI 3.0
//! document.
//!
//! ```no_run
//! use openapi_clientgen::{generate, GenerateOptions};
//! use std::path::Path;
//!
//! let files = generate(
//!     Path::new("openapi.yaml"),
//!     Path::new("src/api"),
//!     &GenerateOptions::default(),
//! )?;
//! println!("wrote {}", files.client.display());
//! # Ok::<(), openapi_clientgen::AppError>(())
//! ```

pub mod from_openapi;

pub use clientgen_core::{AppError, AppResult};
pub use from_openapi::{generate, GenerateOptions, GeneratedFiles, CLIENT_FILE, TYPES_FILE};
