#![deny(missing_docs)]

//! # Clientgen Core
//!
//! Core library for the OpenAPI-to-Rust client generator.

/// Shared error types.
pub mod error;

/// OpenAPI (OAS) loading and resolution.
pub mod oas;

/// Type mapping logic (descriptors -> Rust type expressions).
pub mod type_mapping;

/// Template rendering of the generated files.
pub mod codegen;

pub use codegen::{format_source, RenderOptions, Renderer};
pub use error::{AppError, AppResult};
pub use oas::{
    collect_operations, collect_types, GenerationOutput, OperationDescriptor, SpecDocument,
    TypeCollector, TypeDescriptor,
};
pub use type_mapping::{RustTypeMapper, TypeMapper};

use tracing::info;

/// Resolves every declaration and operation of `doc`.
///
/// Component types come first in document order, followed by the auxiliary
/// types introduced by operations; a name is declared once, first wins.
pub fn build_output(doc: &SpecDocument) -> AppResult<GenerationOutput> {
    let mut collector = TypeCollector::new();
    oas::schemas::collect_types_into(doc, &mut collector)?;
    let components = collector.len();

    let (operations, aux) = collect_operations(doc)?;
    collector.extend(aux);

    let types = collector.into_types();
    info!(
        title = %doc.spec.info.title,
        components,
        types = types.len(),
        operations = operations.len(),
        "resolved document"
    );

    Ok(GenerationOutput {
        title: doc.spec.info.title.clone(),
        version: doc.spec.info.version.clone(),
        types,
        operations,
    })
}
