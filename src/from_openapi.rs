//! # From OpenAPI
//!
//! Loads an OpenAPI 3.0 document and writes `types.rs` and `client.rs` into an
//! output directory.

use clientgen_core::{build_output, AppError, AppResult, RenderOptions, Renderer, SpecDocument};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Name of the generated types file.
pub const TYPES_FILE: &str = "types.rs";

/// Name of the generated client file.
pub const CLIENT_FILE: &str = "client.rs";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Module the generated files live in (`crate::<module>::types`).
    pub module: String,
    /// Replacement for the built-in client template.
    pub client_template: Option<PathBuf>,
    /// Replacement for the built-in types template.
    pub types_template: Option<PathBuf>,
    /// Validate and pretty-print the generated code.
    pub format: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            module: "api".to_string(),
            client_template: None,
            types_template: None,
            format: true,
        }
    }
}

/// What a run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFiles {
    /// Path of the written types file.
    pub types: PathBuf,
    /// Path of the written client file.
    pub client: PathBuf,
    /// Number of declarations in the types file.
    pub type_count: usize,
    /// Number of client methods.
    pub operation_count: usize,
}

/// Generates the types and client files for the document at `spec_path`.
///
/// Nothing is written unless both files rendered successfully.
pub fn generate(
    spec_path: &Path,
    output_dir: &Path,
    options: &GenerateOptions,
) -> AppResult<GeneratedFiles> {
    let types_template = read_template(options.types_template.as_deref())?;
    let client_template = read_template(options.client_template.as_deref())?;
    let renderer = Renderer::with_templates(types_template.as_deref(), client_template.as_deref())?;

    let doc = SpecDocument::load(spec_path)?;
    info!(spec = %spec_path.display(), title = %doc.spec.info.title, "loaded document");

    let output = build_output(&doc)?;
    let render_options = RenderOptions {
        module: options.module.clone(),
        format: options.format,
    };
    let types = renderer.render_types(&output, &render_options)?;
    let client = renderer.render_client(&output, &render_options)?;

    fs::create_dir_all(output_dir).map_err(|source| AppError::Write {
        path: output_dir.to_path_buf(),
        source,
    })?;
    let files = GeneratedFiles {
        types: write_file(&output_dir.join(TYPES_FILE), &types)?,
        client: write_file(&output_dir.join(CLIENT_FILE), &client)?,
        type_count: output.types.len(),
        operation_count: output.operations.len(),
    };

    info!(
        types = files.type_count,
        operations = files.operation_count,
        output = %output_dir.display(),
        "generated client"
    );
    Ok(files)
}

fn read_template(path: Option<&Path>) -> AppResult<Option<String>> {
    let Some(path) = path else {
        return Ok(None);
    };
    debug!(template = %path.display(), "using template override");
    fs::read_to_string(path)
        .map(Some)
        .map_err(|source| AppError::Read {
            path: path.to_path_buf(),
            source,
        })
}

fn write_file(path: &Path, content: &str) -> AppResult<PathBuf> {
    fs::write(path, content).map_err(|source| AppError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), bytes = content.len(), "wrote file");
    Ok(path.to_path_buf())
}
