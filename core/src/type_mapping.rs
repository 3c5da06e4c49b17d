#![deny(missing_docs)]

//! # Type Mapping
//!
//! Converts resolved descriptors into Rust type expressions for the generated
//! files. Handles scalars, collections (`Vec`), optionality (`Option`) and the
//! borrowed forms used for client method arguments.

use crate::oas::models::{Scalar, TypeDescriptor, TypeKind};
use serde_json::Value;

/// How an enum declaration is written out.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnumRepr {
    /// Every value is a string: a Rust enum with one renamed variant per value.
    Strings(Vec<String>),
    /// Anything else: an alias to this type, documented with the allowed values.
    Alias(String),
}

/// Trait for converting descriptors into Rust type expressions.
pub trait TypeMapper {
    /// Owned type expression, e.g. `Vec<User>`.
    fn map(&self, ty: &TypeDescriptor) -> String;

    /// Type of a field of struct `owner`, wrapped in `Option` when optional.
    /// A direct reference back to `owner` is boxed.
    fn field_type(&self, ty: &TypeDescriptor, optional: bool, owner: &str) -> String {
        let inner = match &ty.kind {
            TypeKind::Reference { target } if target == owner => format!("Box<{}>", target),
            _ => self.map(ty),
        };
        if optional {
            format!("Option<{}>", inner)
        } else {
            inner
        }
    }

    /// Borrowed argument type, e.g. `&str` or `&[User]`, wrapped in `Option`
    /// when the argument is not required.
    fn param_type(&self, ty: &TypeDescriptor, required: bool) -> String;
}

/// The standard implementation of `TypeMapper`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RustTypeMapper;

impl TypeMapper for RustTypeMapper {
    fn map(&self, ty: &TypeDescriptor) -> String {
        match &ty.kind {
            TypeKind::Scalar(scalar) => scalar_type(*scalar).to_string(),
            TypeKind::Array { element } => format!("Vec<{}>", self.map(element)),
            TypeKind::Reference { target } => target.clone(),
            // Declarations are only ever used by name.
            TypeKind::Struct { .. } | TypeKind::Enum { .. } => ty.name.clone(),
        }
    }

    fn param_type(&self, ty: &TypeDescriptor, required: bool) -> String {
        let borrowed = match &ty.kind {
            TypeKind::Scalar(Scalar::String) => "&str".to_string(),
            TypeKind::Scalar(Scalar::Untyped) => "&serde_json::Value".to_string(),
            TypeKind::Scalar(scalar) => scalar_type(*scalar).to_string(),
            TypeKind::Array { element } => format!("&[{}]", self.map(element)),
            _ => format!("&{}", self.map(ty)),
        };
        if required {
            borrowed
        } else {
            format!("Option<{}>", borrowed)
        }
    }
}

/// Rust type of a scalar.
pub fn scalar_type(scalar: Scalar) -> &'static str {
    match scalar {
        Scalar::String => "String",
        Scalar::DateTime => "chrono::DateTime<chrono::Utc>",
        Scalar::Integer => "i64",
        Scalar::Number => "f64",
        Scalar::Boolean => "bool",
        Scalar::Untyped => "serde_json::Value",
    }
}

/// Picks the representation of an enum from its literal values.
pub fn enum_repr(values: &[Value]) -> EnumRepr {
    let strings: Option<Vec<String>> = values
        .iter()
        .map(|v| v.as_str().map(str::to_string))
        .collect();
    if let Some(strings) = strings {
        if !strings.is_empty() {
            return EnumRepr::Strings(strings);
        }
    }

    let alias = if !values.is_empty() && values.iter().all(Value::is_boolean) {
        "bool"
    } else if !values.is_empty() && values.iter().all(Value::is_i64) {
        "i64"
    } else if !values.is_empty() && values.iter().all(Value::is_number) {
        "f64"
    } else {
        "serde_json::Value"
    };
    EnumRepr::Alias(alias.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scalar(s: Scalar) -> TypeDescriptor {
        TypeDescriptor::new("S", TypeKind::Scalar(s))
    }

    fn array_of(element: TypeDescriptor) -> TypeDescriptor {
        TypeDescriptor::new(
            "A",
            TypeKind::Array {
                element: Box::new(element),
            },
        )
    }

    #[test]
    fn test_primitive_mapping() {
        let mapper = RustTypeMapper;
        let cases = vec![
            (Scalar::String, "String"),
            (Scalar::DateTime, "chrono::DateTime<chrono::Utc>"),
            (Scalar::Integer, "i64"),
            (Scalar::Number, "f64"),
            (Scalar::Boolean, "bool"),
            (Scalar::Untyped, "serde_json::Value"),
        ];
        for (input, expected) in cases {
            assert_eq!(mapper.map(&scalar(input)), expected);
        }
    }

    #[test]
    fn test_nested_collections() {
        let mapper = RustTypeMapper;
        let ty = array_of(array_of(TypeDescriptor::reference("User")));
        assert_eq!(mapper.map(&ty), "Vec<Vec<User>>");
        assert_eq!(mapper.field_type(&ty, true, "Team"), "Option<Vec<Vec<User>>>");
    }

    #[test]
    fn test_self_reference_is_boxed() {
        let mapper = RustTypeMapper;
        let parent = TypeDescriptor::reference("Node");
        assert_eq!(mapper.field_type(&parent, true, "Node"), "Option<Box<Node>>");
        assert_eq!(mapper.field_type(&parent, false, "Node"), "Box<Node>");
        assert_eq!(mapper.field_type(&parent, true, "Tree"), "Option<Node>");

        // Vec already provides indirection.
        let children = array_of(TypeDescriptor::reference("Node"));
        assert_eq!(mapper.field_type(&children, false, "Node"), "Vec<Node>");
    }

    #[test]
    fn test_param_types_borrow() {
        let mapper = RustTypeMapper;
        assert_eq!(mapper.param_type(&scalar(Scalar::String), true), "&str");
        assert_eq!(mapper.param_type(&scalar(Scalar::Integer), false), "Option<i64>");
        assert_eq!(
            mapper.param_type(&array_of(scalar(Scalar::String)), true),
            "&[String]"
        );
        assert_eq!(
            mapper.param_type(&TypeDescriptor::reference("Sort"), false),
            "Option<&Sort>"
        );
        assert_eq!(
            mapper.param_type(&scalar(Scalar::Untyped), true),
            "&serde_json::Value"
        );
    }

    #[test]
    fn test_enum_representation() {
        assert_eq!(
            enum_repr(&[Value::from("a"), Value::from("b")]),
            EnumRepr::Strings(vec!["a".into(), "b".into()])
        );
        assert_eq!(
            enum_repr(&[Value::from(1), Value::from(2)]),
            EnumRepr::Alias("i64".into())
        );
        assert_eq!(
            enum_repr(&[Value::from(1), Value::from(2.5)]),
            EnumRepr::Alias("f64".into())
        );
        assert_eq!(
            enum_repr(&[Value::from("a"), Value::Null]),
            EnumRepr::Alias("serde_json::Value".into())
        );
        assert_eq!(enum_repr(&[Value::Bool(true)]), EnumRepr::Alias("bool".into()));
    }
}
