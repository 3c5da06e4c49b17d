#![deny(missing_docs)]

//! # OpenAPI Document Loading
//!
//! Reads a YAML or JSON document once into an ordered node tree and builds the
//! typed `openapiv3` model from that same tree. Both are held by
//! [`SpecDocument`], the explicit context passed to the resolver and the
//! route builder.

use crate::error::{AppError, AppResult};
use crate::oas::ordering::{stringify_keys, RawDocument};
use openapiv3::OpenAPI;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

const IN_MEMORY: &str = "<memory>";

/// A loaded OpenAPI 3.0 document.
#[derive(Debug, Clone)]
pub struct SpecDocument {
    /// The typed model.
    pub spec: OpenAPI,
    /// The raw ordered node tree of the same document.
    pub raw: RawDocument,
    /// Where the document came from.
    pub source: PathBuf,
}

impl SpecDocument {
    /// Loads a document from disk.
    pub fn load(path: &Path) -> AppResult<Self> {
        let content = fs::read_to_string(path).map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse_with_source(&content, path.to_path_buf())
    }

    /// Parses an in-memory YAML or JSON document.
    pub fn parse(content: &str) -> AppResult<Self> {
        Self::parse_with_source(content, PathBuf::from(IN_MEMORY))
    }

    fn parse_with_source(content: &str, source: PathBuf) -> AppResult<Self> {
        // JSON is a subset of YAML, one parser covers both.
        let tree: serde_yaml::Value =
            serde_yaml::from_str(content).map_err(|e| AppError::Parse {
                path: source.clone(),
                message: e.to_string(),
            })?;
        let tree = stringify_keys(tree);

        let spec: OpenAPI =
            serde_yaml::from_value(tree.clone()).map_err(|e| AppError::Parse {
                path: source.clone(),
                message: e.to_string(),
            })?;

        if !spec.openapi.starts_with("3.0") {
            return Err(AppError::UnsupportedVersion(spec.openapi));
        }

        debug!(
            source = %source.display(),
            title = %spec.info.title,
            "loaded OpenAPI document"
        );

        Ok(Self {
            spec,
            raw: RawDocument::new(tree),
            source,
        })
    }

    /// Declaration order of the keys under `segments`.
    ///
    /// An empty section needs no order. A populated one must be present in the
    /// raw tree, otherwise iteration order cannot be determined.
    pub fn declaration_order(&self, segments: &[&str], populated: bool) -> AppResult<Vec<String>> {
        if !populated {
            return Ok(Vec::new());
        }
        self.raw
            .keys_at_segments(segments)
            .ok_or_else(|| AppError::MissingOrderingKeys(segments.join(".")))
    }
}
