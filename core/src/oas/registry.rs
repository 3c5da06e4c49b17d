#![deny(missing_docs)]

//! # Component Registry
//!
//! Looks up reusable components (`#/components/{section}/{name}`) of a single
//! document. No external documents are fetched; any reference outside the
//! current document is reported as broken.

use crate::error::{AppError, AppResult};
use indexmap::IndexMap;
use openapiv3::{Components, OpenAPI, Parameter, ReferenceOr, RequestBody, Response};

/// Upper bound on `$ref -> $ref` chains before giving up on a cycle.
const MAX_REF_HOPS: usize = 32;

/// Read-only view over the `components` section of a document.
#[derive(Debug, Clone, Copy)]
pub struct ComponentRegistry<'a> {
    components: Option<&'a Components>,
}

impl<'a> ComponentRegistry<'a> {
    /// Creates a registry for `spec`.
    pub fn new(spec: &'a OpenAPI) -> Self {
        Self {
            components: spec.components.as_ref(),
        }
    }

    /// Follows a parameter node to its definition.
    pub fn parameter(&self, node: &'a ReferenceOr<Parameter>) -> AppResult<&'a Parameter> {
        follow(node, "parameters", |name| {
            self.components.and_then(|c| c.parameters.get(name))
        })
    }

    /// Follows a request body node to its definition.
    pub fn request_body(&self, node: &'a ReferenceOr<RequestBody>) -> AppResult<&'a RequestBody> {
        follow(node, "requestBodies", |name| {
            self.components.and_then(|c| c.request_bodies.get(name))
        })
    }

    /// Follows a response node to its definition.
    pub fn response(&self, node: &'a ReferenceOr<Response>) -> AppResult<&'a Response> {
        follow(node, "responses", |name| {
            self.components.and_then(|c| c.responses.get(name))
        })
    }

    /// Component responses in map order, empty when the section is absent.
    pub fn responses(&self) -> Option<&'a IndexMap<String, ReferenceOr<Response>>> {
        self.components.map(|c| &c.responses)
    }
}

fn follow<'a, T>(
    node: &'a ReferenceOr<T>,
    section: &str,
    lookup: impl Fn(&str) -> Option<&'a ReferenceOr<T>>,
) -> AppResult<&'a T> {
    let mut current = node;
    for _ in 0..MAX_REF_HOPS {
        match current {
            ReferenceOr::Item(item) => return Ok(item),
            ReferenceOr::Reference { reference } => {
                let name = component_name(reference, section)
                    .ok_or_else(|| AppError::BrokenReference(reference.clone()))?;
                current =
                    lookup(&name).ok_or_else(|| AppError::BrokenReference(reference.clone()))?;
            }
        }
    }
    match node {
        ReferenceOr::Reference { reference } => Err(AppError::BrokenReference(reference.clone())),
        ReferenceOr::Item(item) => Ok(item),
    }
}

/// Extracts `{name}` from `#/components/{section}/{name}`, decoding JSON
/// pointer escapes.
///
/// Returns `None` for references into another section or another document.
pub fn component_name(reference: &str, section: &str) -> Option<String> {
    let prefix = format!("#/components/{}/", section);
    let raw = reference.strip_prefix(&prefix)?;
    if raw.is_empty() || raw.contains('/') {
        return None;
    }
    Some(raw.replace("~1", "/").replace("~0", "~"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SPEC: &str = r#"
openapi: 3.0.0
info: {title: Registry, version: 1.0.0}
paths: {}
components:
  parameters:
    UserId: {name: userId, in: path, required: true, schema: {type: string}}
    Alias: {$ref: '#/components/parameters/UserId'}
    Loop: {$ref: '#/components/parameters/Loop'}
  requestBodies:
    NewUser:
      content:
        application/json:
          schema: {type: object}
  responses:
    NotFound: {description: Missing}
"#;

    fn spec() -> OpenAPI {
        serde_yaml::from_str(SPEC).unwrap()
    }

    fn reference<T>(r: &str) -> ReferenceOr<T> {
        ReferenceOr::Reference {
            reference: r.to_string(),
        }
    }

    #[test]
    fn test_component_name() {
        assert_eq!(
            component_name("#/components/schemas/User", "schemas").as_deref(),
            Some("User")
        );
        assert_eq!(
            component_name("#/components/schemas/a~1b", "schemas").as_deref(),
            Some("a/b")
        );
        assert_eq!(component_name("#/components/responses/User", "schemas"), None);
        assert_eq!(component_name("other.yaml#/components/schemas/User", "schemas"), None);
        assert_eq!(component_name("#/components/schemas/", "schemas"), None);
    }

    #[test]
    fn test_follows_parameter_chain() {
        let spec = spec();
        let registry = ComponentRegistry::new(&spec);
        let node = reference("#/components/parameters/Alias");
        let param = registry.parameter(&node).unwrap();
        assert_eq!(param.parameter_data_ref().name, "userId");
    }

    #[test]
    fn test_broken_and_cyclic_references() {
        let spec = spec();
        let registry = ComponentRegistry::new(&spec);

        let missing = reference("#/components/parameters/Nope");
        assert!(matches!(
            registry.parameter(&missing),
            Err(AppError::BrokenReference(r)) if r == "#/components/parameters/Nope"
        ));

        let cyclic = reference("#/components/parameters/Loop");
        assert!(matches!(
            registry.parameter(&cyclic),
            Err(AppError::BrokenReference(_))
        ));
    }

    #[test]
    fn test_bodies_and_responses() {
        let spec = spec();
        let registry = ComponentRegistry::new(&spec);

        let body_ref = reference("#/components/requestBodies/NewUser");
        let body = registry.request_body(&body_ref).unwrap();
        assert!(body.content.contains_key("application/json"));

        let response_ref = reference("#/components/responses/NotFound");
        let response = registry.response(&response_ref).unwrap();
        assert_eq!(response.description, "Missing");
        assert_eq!(registry.responses().map(|r| r.len()), Some(1));
    }

    #[test]
    fn test_no_components_section() {
        let spec: OpenAPI =
            serde_yaml::from_str("openapi: 3.0.0\ninfo: {title: T, version: 1.0.0}\npaths: {}\n")
                .unwrap();
        let registry = ComponentRegistry::new(&spec);
        assert!(registry.responses().is_none());
        assert!(registry
            .response(&reference("#/components/responses/NotFound"))
            .is_err());
    }
}
