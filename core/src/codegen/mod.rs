#![deny(missing_docs)]

//! # Code Generation
//!
//! Renders a [`GenerationOutput`] into the two generated Rust files.
//!
//! Templates are Handlebars; the built-in ones can be replaced at runtime.
//! Rendered text is validated with `syn` and reformatted with `prettyplease`,
//! so a template that produces broken Rust fails with [`AppError::Format`]
//! rather than writing an unusable file.

pub mod views;

use crate::error::{AppError, AppResult};
use crate::oas::models::GenerationOutput;
use crate::type_mapping::RustTypeMapper;
use handlebars::Handlebars;
use serde::Serialize;
use tracing::{debug, error};
use views::{ClientFile, TypesFile};

/// Built-in template for the types file.
pub const TYPES_TEMPLATE: &str = include_str!("../../templates/types.rs.hbs");

/// Built-in template for the client file.
pub const CLIENT_TEMPLATE: &str = include_str!("../../templates/client.rs.hbs");

const TYPES: &str = "types";
const CLIENT: &str = "client";

const NOTICE: &str = "// This file was generated by openapi-clientgen. Do not edit manually.\n\n";

/// Options that shape the rendered files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Module the two files live in; the client imports `crate::<module>::types::*`.
    pub module: String,
    /// Validate and reformat the output.
    pub format: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            module: "api".to_string(),
            format: true,
        }
    }
}

/// Template registry for the generated files.
pub struct Renderer {
    hbs: Handlebars<'static>,
}

impl Renderer {
    /// A renderer using the built-in templates.
    pub fn new() -> AppResult<Self> {
        Self::with_templates(None, None)
    }

    /// A renderer with optional replacement templates.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Template`] if a template does not parse.
    pub fn with_templates(types: Option<&str>, client: Option<&str>) -> AppResult<Self> {
        let mut hbs = Handlebars::new();
        hbs.set_strict_mode(true);
        hbs.register_escape_fn(handlebars::no_escape);

        for (name, source) in [
            (TYPES, types.unwrap_or(TYPES_TEMPLATE)),
            (CLIENT, client.unwrap_or(CLIENT_TEMPLATE)),
        ] {
            hbs.register_template_string(name, source).map_err(|e| {
                error!(template = name, "template does not parse: {}", e);
                AppError::Template(e.to_string())
            })?;
        }

        Ok(Self { hbs })
    }

    /// Renders the types file.
    pub fn render_types(
        &self,
        output: &GenerationOutput,
        options: &RenderOptions,
    ) -> AppResult<String> {
        let view = TypesFile::new(output, &options.module, &RustTypeMapper);
        self.render(TYPES, &view, options)
    }

    /// Renders the client file.
    pub fn render_client(
        &self,
        output: &GenerationOutput,
        options: &RenderOptions,
    ) -> AppResult<String> {
        let view = ClientFile::new(output, &options.module, &RustTypeMapper);
        self.render(CLIENT, &view, options)
    }

    fn render<T: Serialize>(
        &self,
        name: &str,
        data: &T,
        options: &RenderOptions,
    ) -> AppResult<String> {
        let text = self.hbs.render(name, data).map_err(|e| {
            error!(template = name, "template execution failed: {}", e);
            AppError::Template(e.to_string())
        })?;

        if !options.format {
            return Ok(format!("{}{}", NOTICE, text));
        }
        let formatted = format_source(&text).inspect_err(|e| {
            error!(template = name, "rendered output is not valid Rust: {}", e);
        })?;
        debug!(template = name, bytes = formatted.len(), "rendered");
        Ok(format!("{}{}", NOTICE, formatted))
    }
}

/// Validates `source` as a Rust file and pretty-prints it.
pub fn format_source(source: &str) -> AppResult<String> {
    let file = syn::parse_file(source).map_err(|e| AppError::Format(e.to_string()))?;
    Ok(prettyplease::unparse(&file))
}
