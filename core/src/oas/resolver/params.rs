#![deny(missing_docs)]

//! # Parameter Resolution
//!
//! Resolves an OpenAPI `Parameter` into a [`ParameterDescriptor`].

use crate::error::AppResult;
use crate::oas::models::{ParamLocation, ParameterDescriptor, TypeDescriptor};
use crate::oas::naming::{to_field_name, to_type_name};
use crate::oas::resolver::types::{hoist, resolve_schema};
use openapiv3::{Parameter, ParameterSchemaOrContent};
use tracing::debug;

/// Resolves `param` for the operation whose type-name prefix is `operation`.
///
/// The schema is resolved under `<Operation><Parameter>`; an inline enum or
/// object is returned as an auxiliary declaration. Parameters serialized via
/// `content` are untyped.
pub fn resolve_parameter(
    param: &Parameter,
    operation: &str,
) -> AppResult<(ParameterDescriptor, Vec<TypeDescriptor>)> {
    let data = param.parameter_data_ref();
    let location = location_of(param);
    let synthetic = format!("{}{}", operation, to_type_name(&data.name));

    let mut aux = Vec::new();
    let ty = match &data.format {
        ParameterSchemaOrContent::Schema(schema) => {
            let (ty, nested) = resolve_schema(Some(schema), &synthetic)?;
            let ty = hoist(ty, &mut aux);
            aux.extend(nested);
            ty
        }
        ParameterSchemaOrContent::Content(_) => {
            debug!(
                parameter = %data.name,
                "parameter uses `content`, treating it as untyped"
            );
            TypeDescriptor::untyped(synthetic)
        }
    };

    let descriptor = ParameterDescriptor {
        name: to_field_name(&data.name),
        wire_name: data.name.clone(),
        ty,
        required: data.required || location == ParamLocation::Path,
        location,
        description: data.description.clone(),
    };
    Ok((descriptor, aux))
}

/// Location of a parameter.
pub fn location_of(param: &Parameter) -> ParamLocation {
    match param {
        Parameter::Path { .. } => ParamLocation::Path,
        Parameter::Query { .. } => ParamLocation::Query,
        Parameter::Header { .. } => ParamLocation::Header,
        Parameter::Cookie { .. } => ParamLocation::Cookie,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oas::models::{Scalar, TypeKind};

    fn param(yaml: &str) -> Parameter {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_query_parameter() {
        let p = param("{name: maxResults, in: query, description: Page size, schema: {type: integer}}");
        let (d, aux) = resolve_parameter(&p, "ListUsers").unwrap();
        assert!(aux.is_empty());
        assert_eq!(d.name, "max_results");
        assert_eq!(d.wire_name, "maxResults");
        assert_eq!(d.location, ParamLocation::Query);
        assert!(!d.required);
        assert_eq!(d.ty.kind, TypeKind::Scalar(Scalar::Integer));
        assert_eq!(d.description.as_deref(), Some("Page size"));
    }

    #[test]
    fn test_path_parameter_is_required() {
        let p = param("{name: id, in: path, required: true, schema: {type: string}}");
        let (d, _) = resolve_parameter(&p, "GetUser").unwrap();
        assert!(d.required);
        assert_eq!(d.location, ParamLocation::Path);
    }

    #[test]
    fn test_inline_enum_becomes_auxiliary() {
        let p = param("{name: sort, in: query, schema: {type: string, enum: [asc, desc]}}");
        let (d, aux) = resolve_parameter(&p, "ListUsers").unwrap();
        assert_eq!(aux.len(), 1);
        assert_eq!(aux[0].name, "ListUsersSort");
        assert_eq!(
            d.ty.kind,
            TypeKind::Reference {
                target: "ListUsersSort".into()
            }
        );
    }

    #[test]
    fn test_content_parameter_is_untyped() {
        let p = param(
            r#"
name: filter
in: query
content:
  application/json:
    schema: {type: object}
"#,
        );
        let (d, aux) = resolve_parameter(&p, "Search").unwrap();
        assert!(aux.is_empty());
        assert!(d.ty.is_untyped());
        assert_eq!(d.ty.name, "SearchFilter");
    }

    #[test]
    fn test_header_and_cookie_locations() {
        let h = param("{name: X-Request-Id, in: header, schema: {type: string}}");
        let c = param("{name: session, in: cookie, schema: {type: string}}");
        let (h, _) = resolve_parameter(&h, "Op").unwrap();
        let (c, _) = resolve_parameter(&c, "Op").unwrap();
        assert_eq!(h.location, ParamLocation::Header);
        assert_eq!(h.name, "x_request_id");
        assert_eq!(c.location, ParamLocation::Cookie);
    }
}
