#![deny(missing_docs)]

//! # Schema Collection
//!
//! Walks `components.schemas` and `components.responses` in declaration order
//! and produces the deduplicated list of type declarations for the types file.

use crate::error::AppResult;
use crate::oas::document::SpecDocument;
use crate::oas::models::TypeDescriptor;
use crate::oas::naming::to_type_name;
use crate::oas::registry::ComponentRegistry;
use crate::oas::resolver::{resolve_component_response, resolve_schema};
use std::collections::HashMap;
use tracing::{debug, warn};

/// Accumulates declarations by name; the first declaration of a name wins.
#[derive(Debug, Default)]
pub struct TypeCollector {
    types: Vec<TypeDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, dropping it if the name is already taken.
    pub fn push(&mut self, ty: TypeDescriptor) {
        match self.index.get(&ty.name) {
            Some(&kept) if self.types[kept] != ty => {
                warn!(
                    name = %ty.name,
                    "dropping a different declaration with an already used name"
                );
            }
            Some(_) => debug!(name = %ty.name, "dropping identical duplicate declaration"),
            None => {
                self.index.insert(ty.name.clone(), self.types.len());
                self.types.push(ty);
            }
        }
    }

    /// Adds several declarations in order.
    pub fn extend(&mut self, types: impl IntoIterator<Item = TypeDescriptor>) {
        for ty in types {
            self.push(ty);
        }
    }

    /// Number of kept declarations.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Whether nothing has been kept yet.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// The kept declarations in insertion order.
    pub fn into_types(self) -> Vec<TypeDescriptor> {
        self.types
    }
}

/// Resolves every component schema, then every component response, into
/// `collector`. Auxiliary declarations follow their primary.
pub fn collect_types_into(doc: &SpecDocument, collector: &mut TypeCollector) -> AppResult<()> {
    let components = doc.spec.components.as_ref();

    let schemas = components.map(|c| &c.schemas);
    let populated = schemas.is_some_and(|s| !s.is_empty());
    for key in doc.declaration_order(&["components", "schemas"], populated)? {
        let Some(node) = schemas.and_then(|s| s.get(&key)) else {
            continue;
        };
        let name = to_type_name(&key);
        let (mut primary, aux) = resolve_schema(Some(node), &name)?;
        primary.name = name;
        debug!(schema = %key, auxiliaries = aux.len(), "resolved component schema");
        collector.push(primary);
        collector.extend(aux);
    }

    let registry = ComponentRegistry::new(&doc.spec);
    let responses = registry.responses();
    let populated = responses.is_some_and(|r| !r.is_empty());
    for key in doc.declaration_order(&["components", "responses"], populated)? {
        let Some(node) = responses.and_then(|r| r.get(&key)) else {
            continue;
        };
        let (primary, aux) = resolve_component_response(&registry, node, &to_type_name(&key))?;
        debug!(response = %key, auxiliaries = aux.len(), "resolved component response");
        collector.push(primary);
        collector.extend(aux);
    }

    Ok(())
}

/// Deduplicated component declarations in document order.
pub fn collect_types(doc: &SpecDocument) -> AppResult<Vec<TypeDescriptor>> {
    let mut collector = TypeCollector::new();
    collect_types_into(doc, &mut collector)?;
    Ok(collector.into_types())
}
