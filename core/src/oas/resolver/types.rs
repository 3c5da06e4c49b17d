#![deny(missing_docs)]

//! # Schema Resolution
//!
//! Turns one OpenAPI schema node into a [`TypeDescriptor`] plus the auxiliary
//! declarations discovered while walking it.
//!
//! Inline objects and enums cannot be written as type expressions, so they are
//! hoisted into the auxiliary list under a synthetic name (`<Parent><Property>`,
//! `<Parent>Item`) and the parent refers to them by name.

use crate::error::{AppError, AppResult};
use crate::oas::models::{FieldDescriptor, Scalar, TypeDescriptor, TypeKind};
use crate::oas::naming::{ref_type_name, to_field_name, to_type_name};
use indexmap::IndexMap;
use openapiv3::{
    ReferenceOr, Schema, SchemaKind, StringFormat, StringType, Type, VariantOrUnknownOrEmpty,
};
use serde_json::Value;
use std::borrow::Borrow;
use std::collections::HashSet;

/// A primary descriptor and the flattened auxiliary declarations found beneath it.
pub type Resolved = (TypeDescriptor, Vec<TypeDescriptor>);

type Properties = IndexMap<String, ReferenceOr<Box<Schema>>>;

/// Resolves a schema node under `name`.
///
/// `$ref` nodes become [`TypeKind::Reference`] descriptors named after the
/// referenced component, without recursion.
///
/// # Errors
///
/// Returns [`AppError::Resolution`] when the node is absent.
pub fn resolve_schema<S: Borrow<Schema>>(
    node: Option<&ReferenceOr<S>>,
    name: &str,
) -> AppResult<Resolved> {
    let node = node.ok_or_else(|| AppError::Resolution {
        name: name.to_string(),
        reason: "schema is absent".into(),
    })?;

    match node {
        ReferenceOr::Reference { reference } => {
            Ok((TypeDescriptor::reference(ref_type_name(reference)), Vec::new()))
        }
        ReferenceOr::Item(schema) => resolve_item(schema.borrow(), name),
    }
}

/// Resolves an inline schema under `name`.
pub fn resolve_item(schema: &Schema, name: &str) -> AppResult<Resolved> {
    let name = to_type_name(name);
    let mut aux = Vec::new();

    let kind = match &schema.schema_kind {
        SchemaKind::Type(Type::Object(obj)) if !obj.properties.is_empty() => {
            resolve_struct(&name, &obj.properties, &obj.required, &mut aux)?
        }
        SchemaKind::Type(Type::String(s)) if !s.enumeration.is_empty() => TypeKind::Enum {
            values: s
                .enumeration
                .iter()
                .map(|v| v.clone().map_or(Value::Null, Value::String))
                .collect(),
        },
        SchemaKind::Type(Type::Integer(i)) if !i.enumeration.is_empty() => TypeKind::Enum {
            values: i
                .enumeration
                .iter()
                .map(|v| v.map_or(Value::Null, Value::from))
                .collect(),
        },
        SchemaKind::Type(Type::Number(n)) if !n.enumeration.is_empty() => TypeKind::Enum {
            values: n
                .enumeration
                .iter()
                .map(|v| {
                    v.and_then(serde_json::Number::from_f64)
                        .map_or(Value::Null, Value::Number)
                })
                .collect(),
        },
        SchemaKind::Type(Type::Boolean(b)) if !b.enumeration.is_empty() => TypeKind::Enum {
            values: b
                .enumeration
                .iter()
                .map(|v| v.map_or(Value::Null, Value::Bool))
                .collect(),
        },
        SchemaKind::Type(Type::Array(arr)) => {
            resolve_array(&name, arr.items.as_ref(), &mut aux)?
        }
        SchemaKind::Type(Type::String(s)) => TypeKind::Scalar(string_scalar(s)),
        SchemaKind::Type(Type::Integer(_)) => TypeKind::Scalar(Scalar::Integer),
        SchemaKind::Type(Type::Number(_)) => TypeKind::Scalar(Scalar::Number),
        SchemaKind::Type(Type::Boolean(_)) => TypeKind::Scalar(Scalar::Boolean),
        SchemaKind::Any(any) => {
            let typ = any.typ.as_deref();
            if !any.properties.is_empty() && matches!(typ, None | Some("object")) {
                resolve_struct(&name, &any.properties, &any.required, &mut aux)?
            } else if !any.enumeration.is_empty() {
                TypeKind::Enum {
                    values: any.enumeration.clone(),
                }
            } else {
                match typ {
                    Some("array") => resolve_array(&name, any.items.as_ref(), &mut aux)?,
                    Some("string") if any.format.as_deref() == Some("date-time") => {
                        TypeKind::Scalar(Scalar::DateTime)
                    }
                    Some("string") => TypeKind::Scalar(Scalar::String),
                    Some("integer") => TypeKind::Scalar(Scalar::Integer),
                    Some("number") => TypeKind::Scalar(Scalar::Number),
                    Some("boolean") => TypeKind::Scalar(Scalar::Boolean),
                    _ => TypeKind::Scalar(Scalar::Untyped),
                }
            }
        }
        // Free-form objects and compositions degrade to the untyped sentinel.
        SchemaKind::Type(Type::Object(_))
        | SchemaKind::OneOf { .. }
        | SchemaKind::AllOf { .. }
        | SchemaKind::AnyOf { .. }
        | SchemaKind::Not { .. } => TypeKind::Scalar(Scalar::Untyped),
    };

    let descriptor = TypeDescriptor {
        name,
        kind,
        description: schema.schema_data.description.clone(),
    };
    Ok((descriptor, aux))
}

fn string_scalar(s: &StringType) -> Scalar {
    match s.format {
        VariantOrUnknownOrEmpty::Item(StringFormat::DateTime) => Scalar::DateTime,
        _ => Scalar::String,
    }
}

fn resolve_struct(
    name: &str,
    properties: &Properties,
    required: &[String],
    aux: &mut Vec<TypeDescriptor>,
) -> AppResult<TypeKind> {
    // Sort up front so auxiliary types come out in the same order as the fields.
    let mut sorted: Vec<(String, &String, &ReferenceOr<Box<Schema>>)> = properties
        .iter()
        .map(|(json_name, node)| (to_field_name(json_name), json_name, node))
        .collect();
    sorted.sort_by(|a, b| unraw(&a.0).cmp(unraw(&b.0)));

    let mut taken = HashSet::with_capacity(sorted.len());
    let mut fields = Vec::with_capacity(sorted.len());
    for (field_name, json_name, node) in sorted {
        let field_name = unique_field(field_name, &mut taken);
        let synthetic = format!("{}{}", name, to_type_name(json_name));
        let (ty, nested) = resolve_schema(Some(node), &synthetic)?;
        let description = ty.description.clone();
        let ty = hoist(ty, aux);
        aux.extend(nested);

        fields.push(FieldDescriptor {
            name: field_name,
            json_name: json_name.clone(),
            ty,
            optional: !required.contains(json_name),
            description,
        });
    }

    Ok(TypeKind::Struct { fields })
}

fn unraw(ident: &str) -> &str {
    ident.trim_start_matches("r#")
}

/// Distinct properties can share an identifier (`userId`, `user_id`); later
/// ones get a numeric suffix.
fn unique_field(ident: String, taken: &mut HashSet<String>) -> String {
    let mut candidate = ident.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{}_{}", unraw(&ident), n);
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}

fn resolve_array(
    name: &str,
    items: Option<&ReferenceOr<Box<Schema>>>,
    aux: &mut Vec<TypeDescriptor>,
) -> AppResult<TypeKind> {
    let item_name = format!("{}Item", name);
    let element = match items {
        Some(node) => {
            let (element, nested) = resolve_schema(Some(node), &item_name)?;
            let element = hoist(element, aux);
            aux.extend(nested);
            element
        }
        None => TypeDescriptor::untyped(item_name),
    };
    Ok(TypeKind::Array {
        element: Box::new(element),
    })
}

/// Moves a declaration into `aux` and returns a reference to it; any other
/// descriptor is returned unchanged.
pub(crate) fn hoist(ty: TypeDescriptor, aux: &mut Vec<TypeDescriptor>) -> TypeDescriptor {
    if !ty.is_declaration() {
        return ty;
    }
    let reference = TypeDescriptor {
        name: ty.name.clone(),
        kind: TypeKind::Reference {
            target: ty.name.clone(),
        },
        description: ty.description.clone(),
    };
    aux.push(ty);
    reference
}
