#![deny(missing_docs)]

//! # OpenAPI Parsing Module
//!
//! - **document**: loading, version check, raw tree plus typed model.
//! - **ordering**: declaration order of mapping keys.
//! - **models**: descriptors handed to the renderer.
//! - **naming**: Rust-safe identifiers.
//! - **registry**: `#/components/...` lookups.
//! - **resolver**: schemas, parameters, bodies and responses.
//! - **schemas**: component declarations in document order.
//! - **routes**: operations in document order.

pub mod document;
pub mod models;
pub mod naming;
pub mod ordering;
pub mod registry;
pub mod resolver;
pub mod routes;
pub mod schemas;

pub use document::SpecDocument;
pub use models::{
    FieldDescriptor, GenerationOutput, HttpMethod, OperationDescriptor, ParamLocation,
    ParameterDescriptor, Scalar, TypeDescriptor, TypeKind,
};
pub use ordering::RawDocument;
pub use routes::collect_operations;
pub use schemas::{collect_types, TypeCollector};
