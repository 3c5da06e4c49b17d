#![deny(missing_docs)]

//! # Declaration Order
//!
//! The typed OpenAPI model is keyed by maps, so it is not the source of truth
//! for the order in which schemas, responses, paths and methods were written.
//! `RawDocument` keeps the untyped node tree and answers "which keys, in which
//! order" for any mapping in it.

use serde_yaml::{Mapping, Value};

/// The raw, order-preserving node tree of a loaded document.
#[derive(Debug, Clone, PartialEq)]
pub struct RawDocument {
    root: Value,
}

impl RawDocument {
    /// Wraps a parsed node tree.
    pub fn new(root: Value) -> Self {
        Self { root }
    }

    /// The root node.
    pub fn root(&self) -> &Value {
        &self.root
    }

    /// Returns the ordered child keys of the mapping at `dot_path`.
    ///
    /// e.g. `keys_at("components.schemas")` -> `["UserExists", "Response", ...]`
    ///
    /// Returns `None` if any segment is missing or an intermediate node is not a mapping.
    pub fn keys_at(&self, dot_path: &str) -> Option<Vec<String>> {
        let segments: Vec<&str> = dot_path.split('.').collect();
        self.keys_at_segments(&segments)
    }

    /// Same as [`RawDocument::keys_at`] with explicit segments, for keys that
    /// themselves contain dots (path templates like `/v1.2/users`).
    pub fn keys_at_segments(&self, segments: &[&str]) -> Option<Vec<String>> {
        let mut node = &self.root;
        for segment in segments {
            node = child(as_mapping(node)?, segment)?;
        }
        let mapping = as_mapping(node)?;
        Some(mapping.keys().filter_map(key_text).collect())
    }
}

fn as_mapping(node: &Value) -> Option<&Mapping> {
    match node {
        Value::Mapping(m) => Some(m),
        _ => None,
    }
}

fn child<'a>(mapping: &'a Mapping, segment: &str) -> Option<&'a Value> {
    mapping
        .iter()
        .find(|(k, _)| key_text(k).as_deref() == Some(segment))
        .map(|(_, v)| v)
}

/// Scalar text of a mapping key; `200:` and `'200':` both read as `"200"`.
pub(crate) fn key_text(key: &Value) -> Option<String> {
    match key {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Rewrites every scalar mapping key to a string key, recursively.
///
/// OpenAPI keys are strings, but YAML happily reads `200:` as an integer,
/// which the typed model rejects.
pub(crate) fn stringify_keys(value: Value) -> Value {
    match value {
        Value::Mapping(m) => {
            let mut out = Mapping::with_capacity(m.len());
            for (k, v) in m {
                let key = match key_text(&k) {
                    Some(text) => Value::String(text),
                    None => k,
                };
                out.insert(key, stringify_keys(v));
            }
            Value::Mapping(out)
        }
        Value::Sequence(seq) => Value::Sequence(seq.into_iter().map(stringify_keys).collect()),
        Value::Tagged(tagged) => {
            let mut tagged = *tagged;
            tagged.value = stringify_keys(tagged.value);
            Value::Tagged(Box::new(tagged))
        }
        other => other,
    }
}
