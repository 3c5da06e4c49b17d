#![deny(missing_docs)]

//! # Route Builder
//!
//! Turns one path item into operation descriptors.

use crate::error::{AppError, AppResult};
use crate::oas::document::SpecDocument;
use crate::oas::models::{HttpMethod, OperationDescriptor, TypeDescriptor};
use crate::oas::naming::{to_field_name, to_type_name};
use crate::oas::registry::ComponentRegistry;
use crate::oas::resolver::params::location_of;
use crate::oas::resolver::{resolve_operation_response, resolve_parameter, resolve_request_body};
use openapiv3::{Operation, Parameter, PathItem};
use tracing::debug;

/// Operations of one path item and the auxiliary declarations they introduced.
pub type BuiltRoutes = (Vec<OperationDescriptor>, Vec<TypeDescriptor>);

/// Builds the operations of `item`, bound to `path_template`.
///
/// Methods are visited in the order they were written.
pub fn build(doc: &SpecDocument, path_template: &str, item: &PathItem) -> AppResult<BuiltRoutes> {
    let registry = ComponentRegistry::new(&doc.spec);
    let mut operations = Vec::new();
    let mut aux = Vec::new();

    for key in doc.declaration_order(&["paths", path_template], true)? {
        let Some(method) = HttpMethod::from_key(&key) else {
            continue;
        };
        let Some(op) = operation_for(item, method) else {
            continue;
        };
        let (descriptor, nested) = build_operation(&registry, item, op, method, path_template)?;
        debug!(
            operation = %descriptor.name,
            method = %method,
            path = %path_template,
            "resolved operation"
        );
        operations.push(descriptor);
        aux.extend(nested);
    }

    Ok((operations, aux))
}

fn build_operation(
    registry: &ComponentRegistry<'_>,
    item: &PathItem,
    op: &Operation,
    method: HttpMethod,
    path_template: &str,
) -> AppResult<(OperationDescriptor, Vec<TypeDescriptor>)> {
    let operation_id = op
        .operation_id
        .as_deref()
        .ok_or_else(|| AppError::MissingOperationId {
            method: method.to_string(),
            path: path_template.to_string(),
        })?;
    let prefix = to_type_name(operation_id);
    let mut aux = Vec::new();

    let mut parameters = Vec::new();
    for param in merge_parameters(registry, item, op)? {
        let (descriptor, nested) = resolve_parameter(param, &prefix)?;
        parameters.push(descriptor);
        aux.extend(nested);
    }

    let request_body = match &op.request_body {
        Some(node) => resolve_request_body(registry, node, &prefix)?.map(|(ty, nested)| {
            aux.extend(nested);
            ty
        }),
        None => None,
    };

    let (response, nested) = resolve_operation_response(registry, &op.responses, &prefix)?;
    aux.extend(nested);

    let descriptor = OperationDescriptor {
        name: to_field_name(operation_id),
        method,
        path_template: path_template.to_string(),
        parameters,
        request_body,
        response,
        summary: op.summary.clone(),
        description: op.description.clone(),
        deprecated: op.deprecated,
    };
    Ok((descriptor, aux))
}

/// Path-level parameters followed by operation-level ones; an operation-level
/// parameter replaces a path-level one with the same name and location.
fn merge_parameters<'a>(
    registry: &ComponentRegistry<'a>,
    item: &'a PathItem,
    op: &'a Operation,
) -> AppResult<Vec<&'a Parameter>> {
    let mut merged: Vec<&Parameter> = Vec::new();
    for node in &item.parameters {
        merged.push(registry.parameter(node)?);
    }

    for node in &op.parameters {
        let param = registry.parameter(node)?;
        match merged.iter_mut().find(|p| same_parameter(p, param)) {
            Some(slot) => *slot = param,
            None => merged.push(param),
        }
    }
    Ok(merged)
}

fn same_parameter(a: &Parameter, b: &Parameter) -> bool {
    a.parameter_data_ref().name == b.parameter_data_ref().name && location_of(a) == location_of(b)
}

fn operation_for(item: &PathItem, method: HttpMethod) -> Option<&Operation> {
    match method {
        HttpMethod::Get => item.get.as_ref(),
        HttpMethod::Put => item.put.as_ref(),
        HttpMethod::Post => item.post.as_ref(),
        HttpMethod::Delete => item.delete.as_ref(),
        HttpMethod::Options => item.options.as_ref(),
        HttpMethod::Head => item.head.as_ref(),
        HttpMethod::Patch => item.patch.as_ref(),
        HttpMethod::Trace => item.trace.as_ref(),
    }
}
