#![deny(missing_docs)]

//! # Response Resolution
//!
//! Picks the JSON payload type of an operation, and resolves the entries of
//! `components.responses` into named declarations.

use crate::error::AppResult;
use crate::oas::models::{Scalar, TypeDescriptor, TypeKind};
use crate::oas::naming::ref_type_name;
use crate::oas::registry::ComponentRegistry;
use crate::oas::resolver::body::json_schema;
use crate::oas::resolver::types::{hoist, resolve_schema, Resolved};
use openapiv3::{ReferenceOr, Response, Responses};

/// Resolves the response type of an operation as `<Operation>Response`.
///
/// Status codes are scanned in declared order, then `default`. The first
/// response with a JSON schema wins; a `$ref` to such a component response
/// becomes a reference to the component's declaration. Without any JSON
/// schema the result is the untyped sentinel.
pub fn resolve_operation_response(
    registry: &ComponentRegistry<'_>,
    responses: &Responses,
    operation: &str,
) -> AppResult<Resolved> {
    let name = format!("{}Response", operation);
    let candidates = responses
        .responses
        .values()
        .chain(responses.default.as_ref());

    for node in candidates {
        let response = registry.response(node)?;
        let Some(schema) = json_schema(&response.content) else {
            continue;
        };

        if let ReferenceOr::Reference { reference } = node {
            return Ok((TypeDescriptor::reference(ref_type_name(reference)), Vec::new()));
        }

        let (ty, nested) = resolve_schema(Some(schema), &name)?;
        let mut aux = Vec::new();
        let ty = hoist(ty, &mut aux);
        aux.extend(nested);
        return Ok((ty, aux));
    }

    Ok((TypeDescriptor::untyped(name), Vec::new()))
}

/// Resolves a component response into a declaration named `name`.
///
/// A response without a JSON schema becomes the untyped sentinel carrying the
/// response description.
pub fn resolve_component_response(
    registry: &ComponentRegistry<'_>,
    node: &ReferenceOr<Response>,
    name: &str,
) -> AppResult<Resolved> {
    let response = registry.response(node)?;
    match json_schema(&response.content) {
        Some(schema) => {
            let (mut ty, aux) = resolve_schema(Some(schema), name)?;
            ty.name = name.to_string();
            if ty.description.is_none() && !response.description.is_empty() {
                ty.description = Some(response.description.clone());
            }
            Ok((ty, aux))
        }
        None => Ok((
            TypeDescriptor {
                name: name.to_string(),
                kind: TypeKind::Scalar(Scalar::Untyped),
                description: Some(response.description.clone()).filter(|d| !d.is_empty()),
            },
            Vec::new(),
        )),
    }
}
