#![deny(missing_docs)]

//! # Resolver Module
//!
//! Logic for resolving OpenAPI nodes into descriptors.
//!
//! - **types**: schemas, recursively, with auxiliary declarations hoisted out.
//! - **params**: operation parameters.
//! - **body**: request bodies and JSON media selection.
//! - **responses**: operation responses and component responses.

pub mod body;
pub mod params;
pub mod responses;
pub mod types;

pub use body::{is_json_media, json_schema, resolve_request_body};
pub use params::resolve_parameter;
pub use responses::{resolve_component_response, resolve_operation_response};
pub use types::{resolve_item, resolve_schema, Resolved};
