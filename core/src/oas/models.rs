#![deny(missing_docs)]

//! # OpenAPI Models
//!
//! Language-agnostic descriptors produced from an OpenAPI document.
//!
//! These structs transport resolved schema and operation data from the
//! resolver and route builder into the renderer. They are built fresh per
//! generation run and never mutated once handed over.

use std::fmt;

/// Scalar kinds, including the untyped sentinel used for best-effort degradation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scalar {
    /// `type: string`
    String,
    /// `type: string, format: date-time`
    DateTime,
    /// `type: integer`
    Integer,
    /// `type: number`
    Number,
    /// `type: boolean`
    Boolean,
    /// Anything the resolver does not recognise.
    Untyped,
}

/// The shape of a resolved schema.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeKind {
    /// A scalar value.
    Scalar(Scalar),
    /// An object with named properties.
    Struct {
        /// Fields, sorted by name.
        fields: Vec<FieldDescriptor>,
    },
    /// A list of `element`.
    Array {
        /// Element type (a scalar, array or reference).
        element: Box<TypeDescriptor>,
    },
    /// A closed set of literal values, kept verbatim.
    Enum {
        /// Allowed values in declaration order.
        values: Vec<serde_json::Value>,
    },
    /// A named type declared elsewhere in the run.
    Reference {
        /// Name of the referenced declaration.
        target: String,
    },
}

/// A named or synthesized type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeDescriptor {
    /// Type name in the generated code's naming convention.
    pub name: String,
    /// Discriminated shape.
    pub kind: TypeKind,
    /// Schema description, if any.
    pub description: Option<String>,
}

impl TypeDescriptor {
    /// Creates a descriptor without description.
    pub fn new(name: impl Into<String>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            description: None,
        }
    }

    /// The "untyped/any" sentinel.
    pub fn untyped(name: impl Into<String>) -> Self {
        Self::new(name, TypeKind::Scalar(Scalar::Untyped))
    }

    /// A reference to the declaration called `target`.
    pub fn reference(target: impl Into<String>) -> Self {
        let target = target.into();
        Self::new(target.clone(), TypeKind::Reference { target })
    }

    /// Whether this descriptor needs a declaration of its own when used inline
    /// (fields, array elements, bodies). Structs and enums do; everything else
    /// can be written as a type expression.
    pub fn is_declaration(&self) -> bool {
        matches!(self.kind, TypeKind::Struct { .. } | TypeKind::Enum { .. })
    }

    /// Whether this is the untyped sentinel.
    pub fn is_untyped(&self) -> bool {
        matches!(self.kind, TypeKind::Scalar(Scalar::Untyped))
    }

    /// Struct fields, empty for any other kind.
    pub fn fields(&self) -> &[FieldDescriptor] {
        match &self.kind {
            TypeKind::Struct { fields } => fields,
            _ => &[],
        }
    }
}

/// A single property of a struct descriptor.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDescriptor {
    /// Field identifier (snake_case, keyword-safe).
    pub name: String,
    /// Property name on the wire.
    pub json_name: String,
    /// Field type; structs and enums appear here only as references.
    pub ty: TypeDescriptor,
    /// True when `json_name` is absent from the parent's `required` list.
    pub optional: bool,
    /// Property description, if any.
    pub description: Option<String>,
}

/// The location of a parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamLocation {
    /// Path.
    Path,
    /// Query.
    Query,
    /// Header.
    Header,
    /// Cookie.
    Cookie,
}

impl fmt::Display for ParamLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Cookie => "cookie",
        };
        write!(f, "{}", s)
    }
}

/// A resolved operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor {
    /// Argument identifier (snake_case, keyword-safe).
    pub name: String,
    /// Parameter name on the wire.
    pub wire_name: String,
    /// Parameter type.
    pub ty: TypeDescriptor,
    /// Whether the parameter must be supplied. Always true for path parameters.
    pub required: bool,
    /// Location.
    pub location: ParamLocation,
    /// Parameter description, if any.
    pub description: Option<String>,
}

/// HTTP methods an OpenAPI 3.0 path item can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    /// GET
    Get,
    /// PUT
    Put,
    /// POST
    Post,
    /// DELETE
    Delete,
    /// OPTIONS
    Options,
    /// HEAD
    Head,
    /// PATCH
    Patch,
    /// TRACE
    Trace,
}

impl HttpMethod {
    /// Parses a path item key (`get`, `post`, ...). Non-method keys return `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "get" => Some(HttpMethod::Get),
            "put" => Some(HttpMethod::Put),
            "post" => Some(HttpMethod::Post),
            "delete" => Some(HttpMethod::Delete),
            "options" => Some(HttpMethod::Options),
            "head" => Some(HttpMethod::Head),
            "patch" => Some(HttpMethod::Patch),
            "trace" => Some(HttpMethod::Trace),
            _ => None,
        }
    }

    /// Upper-case method name, e.g. `GET`.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
            HttpMethod::Delete => "DELETE",
            HttpMethod::Options => "OPTIONS",
            HttpMethod::Head => "HEAD",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Trace => "TRACE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One HTTP method bound to one path template.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor {
    /// Method identifier derived from `operationId`.
    pub name: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path template, e.g. `/users/{id}`.
    pub path_template: String,
    /// Merged path-level and operation-level parameters.
    pub parameters: Vec<ParameterDescriptor>,
    /// JSON request body type, if the operation declares one.
    pub request_body: Option<TypeDescriptor>,
    /// JSON response type, or the untyped sentinel.
    pub response: TypeDescriptor,
    /// Operation summary.
    pub summary: Option<String>,
    /// Operation description.
    pub description: Option<String>,
    /// Whether the operation is deprecated.
    pub deprecated: bool,
}

impl OperationDescriptor {
    /// Parameters declared `in: path`.
    pub fn path_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.params_in(ParamLocation::Path)
    }

    /// Parameters declared `in: query`.
    pub fn query_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.params_in(ParamLocation::Query)
    }

    /// Parameters declared `in: header`.
    pub fn header_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.params_in(ParamLocation::Header)
    }

    /// Parameters declared `in: cookie`.
    pub fn cookie_params(&self) -> impl Iterator<Item = &ParameterDescriptor> {
        self.params_in(ParamLocation::Cookie)
    }

    fn params_in(&self, location: ParamLocation) -> impl Iterator<Item = &ParameterDescriptor> {
        self.parameters
            .iter()
            .filter(move |p| p.location == location)
    }
}

/// Everything one generation run hands to the renderer.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GenerationOutput {
    /// `info.title`.
    pub title: String,
    /// `info.version`.
    pub version: String,
    /// Deduplicated type declarations in emission order.
    pub types: Vec<TypeDescriptor>,
    /// Operations in document order.
    pub operations: Vec<OperationDescriptor>,
}
