#![deny(missing_docs)]

//! # Request Body Resolution

use crate::error::AppResult;
use crate::oas::registry::ComponentRegistry;
use crate::oas::resolver::types::{hoist, resolve_schema, Resolved};
use indexmap::IndexMap;
use openapiv3::{MediaType, ReferenceOr, RequestBody, Schema};

/// Whether `media_type` carries JSON: `application/json` or any `+json` suffix.
/// Media type parameters (`; charset=utf-8`) are ignored.
pub fn is_json_media(media_type: &str) -> bool {
    let essence = media_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    essence == "application/json" || essence.ends_with("+json")
}

/// First JSON media type in `content` that declares a schema.
pub fn json_schema(content: &IndexMap<String, MediaType>) -> Option<&ReferenceOr<Schema>> {
    content
        .iter()
        .filter(|(media_type, _)| is_json_media(media_type))
        .find_map(|(_, media)| media.schema.as_ref())
}

/// Resolves a request body as `<Operation>Body`.
///
/// Returns `None` when the body has no JSON schema. Inline objects and enums
/// come back as a reference plus the declaration in the auxiliary list.
pub fn resolve_request_body(
    registry: &ComponentRegistry<'_>,
    node: &ReferenceOr<RequestBody>,
    operation: &str,
) -> AppResult<Option<Resolved>> {
    let body = registry.request_body(node)?;
    let Some(schema) = json_schema(&body.content) else {
        return Ok(None);
    };

    let (ty, nested) = resolve_schema(Some(schema), &format!("{}Body", operation))?;
    let mut aux = Vec::new();
    let ty = hoist(ty, &mut aux);
    aux.extend(nested);
    Ok(Some((ty, aux)))
}
