#![deny(missing_docs)]

//! # Template Views
//!
//! Serializable data handed to the templates. Everything a template needs is
//! precomputed here: Rust type expressions, string literals, doc lines and
//! parameter buckets, so templates stay free of logic beyond loops and flags.

use crate::oas::models::{
    GenerationOutput, OperationDescriptor, ParamLocation, ParameterDescriptor, TypeDescriptor,
    TypeKind,
};
use crate::oas::naming::{to_field_name, to_variant_name};
use crate::type_mapping::{enum_repr, EnumRepr, TypeMapper};
use serde::Serialize;
use std::collections::HashSet;
use tracing::debug;

/// Method names already taken by the generated `Client`.
const CLIENT_RESERVED: &[&str] = &["new", "with_http_client", "base_url"];

/// Locals and helpers a client method body uses; arguments must not shadow them.
const METHOD_LOCALS: &[&str] = &[
    "url",
    "request",
    "response",
    "cookies",
    "value",
    "values",
    "decode",
    "param_string",
];

/// View of the generated types file.
#[derive(Debug, Clone, Serialize)]
pub struct TypesFile {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
    /// Module the generated files live in.
    pub module: String,
    /// Declarations in emission order.
    pub types: Vec<TypeView>,
}

/// One declaration.
#[derive(Debug, Clone, Serialize)]
pub struct TypeView {
    /// Type name.
    pub name: String,
    /// Doc comment lines, each with its leading space.
    pub doc_lines: Vec<String>,
    /// Rendered as a struct.
    pub is_struct: bool,
    /// Rendered as a Rust enum.
    pub is_enum: bool,
    /// Rendered as a `pub type` alias.
    pub is_alias: bool,
    /// Struct fields.
    pub fields: Vec<FieldView>,
    /// Enum variants.
    pub variants: Vec<VariantView>,
    /// Aliased type expression.
    pub alias: String,
}

/// One struct field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldView {
    /// Field identifier.
    pub name: String,
    /// Wire name as a Rust string literal.
    pub json_name: String,
    /// Field type expression.
    pub ty: String,
    /// Whether the field may be absent.
    pub optional: bool,
    /// Doc comment lines.
    pub doc_lines: Vec<String>,
}

/// One enum variant.
#[derive(Debug, Clone, Serialize)]
pub struct VariantView {
    /// Variant identifier.
    pub name: String,
    /// Wire value as a Rust string literal.
    pub value: String,
}

/// View of the generated client file.
#[derive(Debug, Clone, Serialize)]
pub struct ClientFile {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
    /// Module the generated files live in.
    pub module: String,
    /// Client methods in document order.
    pub operations: Vec<OperationView>,
}

/// One client method.
#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
    /// Method identifier.
    pub name: String,
    /// `reqwest::Method` constant name, e.g. `GET`.
    pub method: String,
    /// Path template as written in the document.
    pub path_template: String,
    /// Doc comment lines.
    pub doc_lines: Vec<String>,
    /// Whether to mark the method `#[deprecated]`.
    pub deprecated: bool,
    /// Method arguments after `&self`.
    pub args: Vec<ArgView>,
    /// `format!` string literal building the URL; the first `{}` is the base URL.
    pub url_format: String,
    /// Arguments substituted into the path, in order.
    pub url_args: Vec<String>,
    /// Query parameters.
    pub query: Vec<ParamView>,
    /// Header parameters.
    pub headers: Vec<ParamView>,
    /// Cookie parameters.
    pub cookies: Vec<ParamView>,
    /// Whether a JSON body is sent.
    pub has_body: bool,
    /// Body argument identifier, empty without a body.
    pub body: String,
    /// Response type expression.
    pub return_type: String,
}

/// One method argument.
#[derive(Debug, Clone, Serialize)]
pub struct ArgView {
    /// Argument identifier.
    pub name: String,
    /// Argument type expression.
    pub ty: String,
}

/// One non-path parameter.
#[derive(Debug, Clone, Serialize)]
pub struct ParamView {
    /// Argument identifier.
    pub ident: String,
    /// Wire name as a Rust string literal.
    pub wire: String,
    /// Whether the argument is required (not an `Option`).
    pub required: bool,
    /// Whether the argument is a slice sent as repeated values.
    pub is_array: bool,
}

impl TypesFile {
    /// Builds the view for `output`.
    pub fn new(output: &GenerationOutput, module: &str, mapper: &dyn TypeMapper) -> Self {
        let types = output
            .types
            .iter()
            .filter(|ty| !is_self_alias(ty))
            .map(|ty| TypeView::new(ty, mapper))
            .collect();
        Self {
            title: output.title.clone(),
            version: output.version.clone(),
            module: module.to_string(),
            types,
        }
    }
}

fn is_self_alias(ty: &TypeDescriptor) -> bool {
    let cyclic = matches!(&ty.kind, TypeKind::Reference { target } if *target == ty.name);
    if cyclic {
        debug!(name = %ty.name, "skipping alias to itself");
    }
    cyclic
}

impl TypeView {
    /// Builds the view of one declaration.
    pub fn new(ty: &TypeDescriptor, mapper: &dyn TypeMapper) -> Self {
        let mut view = Self {
            name: ty.name.clone(),
            doc_lines: doc_lines(ty.description.as_deref()),
            is_struct: false,
            is_enum: false,
            is_alias: false,
            fields: Vec::new(),
            variants: Vec::new(),
            alias: String::new(),
        };

        match &ty.kind {
            TypeKind::Struct { fields } => {
                view.is_struct = true;
                view.fields = fields
                    .iter()
                    .map(|f| FieldView {
                        name: f.name.clone(),
                        json_name: literal(&f.json_name),
                        ty: mapper.field_type(&f.ty, f.optional, &ty.name),
                        optional: f.optional,
                        doc_lines: doc_lines(f.description.as_deref()),
                    })
                    .collect();
            }
            TypeKind::Enum { values } => match enum_repr(values) {
                EnumRepr::Strings(strings) => {
                    view.is_enum = true;
                    view.variants = variants(&strings);
                }
                EnumRepr::Alias(alias) => {
                    view.is_alias = true;
                    view.alias = alias;
                    let allowed: Vec<String> =
                        values.iter().map(|v| format!("`{}`", v)).collect();
                    if !view.doc_lines.is_empty() {
                        view.doc_lines.push(String::new());
                    }
                    view.doc_lines
                        .push(format!(" Allowed values: {}", allowed.join(", ")));
                }
            },
            TypeKind::Scalar(_) | TypeKind::Array { .. } | TypeKind::Reference { .. } => {
                view.is_alias = true;
                view.alias = mapper.map(ty);
            }
        }
        view
    }
}

fn variants(values: &[String]) -> Vec<VariantView> {
    let mut taken = HashSet::new();
    values
        .iter()
        .enumerate()
        .map(|(i, value)| {
            let base = to_variant_name(value);
            let name = if taken.contains(&base) {
                format!("{}{}", base, i)
            } else {
                base
            };
            taken.insert(name.clone());
            VariantView {
                name,
                value: literal(value),
            }
        })
        .collect()
}

impl ClientFile {
    /// Builds the view for `output`.
    pub fn new(output: &GenerationOutput, module: &str, mapper: &dyn TypeMapper) -> Self {
        let mut taken: HashSet<String> = CLIENT_RESERVED.iter().map(|s| s.to_string()).collect();
        let operations = output
            .operations
            .iter()
            .map(|op| {
                let name = unique(&op.name, "op", &mut taken);
                OperationView::new(op, name, mapper)
            })
            .collect();
        Self {
            title: output.title.clone(),
            version: output.version.clone(),
            module: module.to_string(),
            operations,
        }
    }
}

impl OperationView {
    fn new(op: &OperationDescriptor, name: String, mapper: &dyn TypeMapper) -> Self {
        let mut taken: HashSet<String> = METHOD_LOCALS.iter().map(|s| s.to_string()).collect();
        let mut args = Vec::new();
        let mut idents = Vec::with_capacity(op.parameters.len());

        // Path parameters first, in the order they appear in the template.
        let ordered: Vec<&ParameterDescriptor> = op
            .path_params()
            .chain(op.query_params())
            .chain(op.header_params())
            .chain(op.cookie_params())
            .collect();
        for param in &ordered {
            let ident = unique(&param.name, &param.location.to_string(), &mut taken);
            args.push(ArgView {
                name: ident.clone(),
                ty: mapper.param_type(&param.ty, param.required),
            });
            idents.push((*param, ident));
        }

        let body = match &op.request_body {
            Some(ty) => {
                let ident = unique("body", "request", &mut taken);
                args.push(ArgView {
                    name: ident.clone(),
                    ty: format!("&{}", mapper.map(ty)),
                });
                ident
            }
            None => String::new(),
        };

        let (url_format, url_args) = url_format(&op.path_template, &idents);
        let bucket = |location: ParamLocation| -> Vec<ParamView> {
            idents
                .iter()
                .filter(|(p, _)| p.location == location)
                .map(|(p, ident)| ParamView {
                    ident: ident.clone(),
                    wire: literal(&p.wire_name),
                    required: p.required,
                    is_array: matches!(p.ty.kind, TypeKind::Array { .. }),
                })
                .collect()
        };

        Self {
            name,
            method: op.method.as_str().to_string(),
            path_template: op.path_template.clone(),
            doc_lines: operation_doc(op),
            deprecated: op.deprecated,
            query: bucket(ParamLocation::Query),
            headers: bucket(ParamLocation::Header),
            cookies: bucket(ParamLocation::Cookie),
            args,
            url_format,
            url_args,
            has_body: op.request_body.is_some(),
            body,
            return_type: mapper.map(&op.response),
        }
    }
}

/// Turns `/users/{userId}` into the literal `"{}/users/{}"` plus the argument
/// idents to substitute. Placeholders without a matching path parameter are
/// kept verbatim.
fn url_format(template: &str, idents: &[(&ParameterDescriptor, String)]) -> (String, Vec<String>) {
    let mut format = String::from("{}");
    let mut args = Vec::new();
    let mut rest = template;

    while let Some(start) = rest.find('{') {
        let Some(len) = rest[start..].find('}') else {
            break;
        };
        format.push_str(&escape_braces(&rest[..start]));
        let wire = &rest[start + 1..start + len];
        let ident = idents
            .iter()
            .find(|(p, _)| p.location == ParamLocation::Path && p.wire_name == wire)
            .map(|(_, ident)| ident);
        match ident {
            Some(ident) => {
                format.push_str("{}");
                args.push(ident.clone());
            }
            None => format.push_str(&escape_braces(&rest[start..=start + len])),
        }
        rest = &rest[start + len + 1..];
    }
    format.push_str(&escape_braces(rest));

    (literal(&format), args)
}

fn escape_braces(s: &str) -> String {
    s.replace('{', "{{").replace('}', "}}")
}

fn operation_doc(op: &OperationDescriptor) -> Vec<String> {
    let mut lines = Vec::new();
    for block in [op.summary.as_deref(), op.description.as_deref()] {
        let block = doc_lines(block);
        if block.is_empty() {
            continue;
        }
        if !lines.is_empty() {
            lines.push(String::new());
        }
        lines.extend(block);
    }
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(format!(" `{} {}`", op.method, op.path_template));
    lines
}

/// Splits a description into doc comment lines. Each non-empty line keeps a
/// leading space so templates can write `///{{this}}`.
pub fn doc_lines(text: Option<&str>) -> Vec<String> {
    let Some(text) = text.map(str::trim).filter(|t| !t.is_empty()) else {
        return Vec::new();
    };
    text.lines()
        .map(|line| {
            let line = line.trim_end();
            if line.is_empty() {
                String::new()
            } else {
                format!(" {}", line)
            }
        })
        .collect()
}

/// A Rust string literal for `s`.
pub fn literal(s: &str) -> String {
    format!("{:?}", s)
}

/// Returns `name` (as an identifier) or, when taken, `name_<suffix>`, then a
/// numbered variant.
fn unique(name: &str, suffix: &str, taken: &mut HashSet<String>) -> String {
    let mut candidate = name.to_string();
    if taken.contains(&candidate) {
        candidate = to_field_name(&format!("{}_{}", name.trim_start_matches("r#"), suffix));
    }
    let base = candidate.clone();
    let mut n = 2;
    while taken.contains(&candidate) {
        candidate = format!("{}{}", base, n);
        n += 1;
    }
    taken.insert(candidate.clone());
    candidate
}
