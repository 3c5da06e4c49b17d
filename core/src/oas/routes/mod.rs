#![deny(missing_docs)]

//! # Routes Module
//!
//! Entry point for turning OpenAPI `paths` into operation descriptors.

pub mod builder;

use crate::error::AppResult;
use crate::oas::document::SpecDocument;
use crate::oas::models::{OperationDescriptor, TypeDescriptor};
use openapiv3::ReferenceOr;
use tracing::warn;

pub use builder::{build, BuiltRoutes};

/// Builds every operation of the document, paths in the order they were written.
///
/// Returns the operations and the auxiliary declarations their parameters,
/// bodies and responses introduced.
pub fn collect_operations(doc: &SpecDocument) -> AppResult<BuiltRoutes> {
    let paths = &doc.spec.paths.paths;
    let mut operations: Vec<OperationDescriptor> = Vec::new();
    let mut aux: Vec<TypeDescriptor> = Vec::new();

    for path in doc.declaration_order(&["paths"], !paths.is_empty())? {
        match paths.get(&path) {
            Some(ReferenceOr::Item(item)) => {
                let (ops, nested) = build(doc, &path, item)?;
                operations.extend(ops);
                aux.extend(nested);
            }
            Some(ReferenceOr::Reference { reference }) => {
                warn!(path = %path, reference = %reference, "skipping referenced path item");
            }
            None => {}
        }
    }

    Ok((operations, aux))
}
