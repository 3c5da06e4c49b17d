#![deny(missing_docs)]

//! # Naming Utilities
//!
//! Helper functions for deriving Rust-safe identifiers from OpenAPI names,
//! `$ref` locations and Operation IDs.

use heck::{ToPascalCase, ToSnakeCase};

/// Keywords that can be used as raw identifiers (`r#type`).
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in", "let",
    "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref", "return",
    "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized", "use",
    "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED_KEYWORDS: &[&str] = &["crate", "self", "Self", "super", "_"];

/// Converts a schema, response or property path into a Rust type name.
///
/// e.g. `user_profile` -> `UserProfile`, `2fa-code` -> `T2faCode`
pub fn to_type_name(s: &str) -> String {
    let name = s.to_pascal_case();
    if name.is_empty() {
        return "Unnamed".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("T{}", name);
    }
    if RESERVED_KEYWORDS.contains(&name.as_str()) {
        return format!("{}_", name);
    }
    name
}

/// Converts a property, parameter or `operationId` into a snake_case identifier.
///
/// Rust keywords become raw identifiers where the language allows it.
pub fn to_field_name(s: &str) -> String {
    let name = s.to_snake_case();
    if name.is_empty() {
        return "field".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{}", name);
    }
    if RESERVED_KEYWORDS.contains(&name.as_str()) {
        return format!("{}_", name);
    }
    if RAW_KEYWORDS.contains(&name.as_str()) {
        return format!("r#{}", name);
    }
    name
}

/// Converts an enum literal into a variant name.
pub fn to_variant_name(value: &str) -> String {
    let name = value.to_pascal_case();
    if name.is_empty() {
        return "Empty".to_string();
    }
    if name.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("V{}", name);
    }
    if RESERVED_KEYWORDS.contains(&name.as_str()) {
        return format!("{}_", name);
    }
    name
}

/// Extracts the final segment of a reference location.
///
/// e.g. `#/components/schemas/User` -> `User`
pub fn ref_segment(reference: &str) -> &str {
    reference.rsplit('/').next().unwrap_or(reference)
}

/// Extracts the type name a reference points at.
///
/// e.g. `#/components/schemas/user_profile` -> `UserProfile`
pub fn ref_type_name(reference: &str) -> String {
    to_type_name(ref_segment(reference))
}
