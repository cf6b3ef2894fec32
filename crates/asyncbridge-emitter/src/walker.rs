//! Namespace traversal and per-operation descriptors.

use crate::naming::{default_channel_address, default_channel_key};
use asyncbridge_core::ast::{Namespace, Operation, Program, Type, qualify};
use asyncbridge_core::document::Action;
use asyncbridge_core::state::{MessageAnnotation, ProtocolAnnotation, SecurityAnnotation};
use asyncbridge_core::{AnnotationState, Diagnostic, DiagnosticCode, DiagnosticSink};
use tracing::debug;

/// An operation found during traversal, with where it was found.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoveredOperation<'a> {
    pub operation: &'a Operation,

    /// `<ns>.<op>` or `<ns>.<interface>.<op>`; annotation lookup key.
    pub qualified_name: String,

    /// Qualified name of the enclosing namespace.
    pub namespace: String,

    pub interface: Option<&'a str>,
}

/// Collect every reachable operation in pre-order.
///
/// Within one namespace its own operations come first, then interface
/// operations in declaration order, then child namespaces.
pub fn discover_operations(program: &Program) -> Vec<DiscoveredOperation<'_>> {
    let mut found = Vec::new();
    walk_operations(&program.root, String::new(), &mut found);
    found
}

fn walk_operations<'a>(
    namespace: &'a Namespace,
    prefix: String,
    found: &mut Vec<DiscoveredOperation<'a>>,
) {
    let qualified = qualify(&prefix, &namespace.name);

    for operation in &namespace.operations {
        found.push(DiscoveredOperation {
            operation,
            qualified_name: qualify(&qualified, &operation.name),
            namespace: qualified.clone(),
            interface: None,
        });
    }

    for interface in &namespace.interfaces {
        let interface_name = qualify(&qualified, &interface.name);
        for operation in &interface.operations {
            found.push(DiscoveredOperation {
                operation,
                qualified_name: qualify(&interface_name, &operation.name),
                namespace: qualified.clone(),
                interface: Some(interface.name.as_str()),
            });
        }
    }

    if namespace.namespaces.is_none() {
        debug!(namespace = %qualified, "namespace has no child collection, treating as empty");
    }
    for child in namespace.children() {
        walk_operations(child, qualified.clone(), found);
    }
}

/// Every namespace in pre-order with its qualified name.
pub fn discover_namespaces(program: &Program) -> Vec<(String, &Namespace)> {
    let mut found = Vec::new();
    walk_namespaces(&program.root, "", &mut found);
    found
}

fn walk_namespaces<'a>(
    namespace: &'a Namespace,
    prefix: &str,
    found: &mut Vec<(String, &'a Namespace)>,
) {
    let qualified = qualify(prefix, &namespace.name);
    found.push((qualified.clone(), namespace));
    for child in namespace.children() {
        walk_namespaces(child, &qualified, found);
    }
}

/// A declared operation parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterDescriptor<'a> {
    pub name: &'a str,
    pub ty: &'a Type,
    pub optional: bool,
    pub description: Option<&'a str>,
}

/// Everything the assembler needs to know about one operation.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationDescriptor<'a> {
    pub name: &'a str,
    pub qualified_name: String,
    pub parameters: Vec<ParameterDescriptor<'a>>,
    pub return_type: Option<&'a Type>,
    pub channel_key: String,
    pub address: String,
    pub channel_title: Option<&'a str>,
    pub channel_description: Option<&'a str>,
    pub action: Action,
    pub description: Option<&'a str>,
    pub protocol: Option<&'a ProtocolAnnotation>,
    pub message: Option<&'a MessageAnnotation>,
    pub security: Vec<&'a SecurityAnnotation>,
}

impl OperationDescriptor<'_> {
    pub fn parameter(&self, name: &str) -> Option<&ParameterDescriptor<'_>> {
        self.parameters.iter().find(|p| p.name == name)
    }
}

/// Read the annotation state of one operation and apply defaults.
///
/// Missing channel and role metadata fall back silently; an empty channel
/// path and conflicting roles are reported to `sink`.
pub fn describe_operation<'a>(
    discovered: &DiscoveredOperation<'a>,
    state: &'a AnnotationState,
    sink: &mut dyn DiagnosticSink,
) -> OperationDescriptor<'a> {
    let operation = discovered.operation;
    let target = discovered.qualified_name.as_str();
    let channel = state.channel(target);

    let address = match channel {
        Some(annotation) if !annotation.path.trim().is_empty() => annotation.path.clone(),
        Some(_) => {
            let fallback = default_channel_address(&operation.name);
            sink.report(
                Diagnostic::new(
                    DiagnosticCode::MissingChannelPath,
                    &[
                        ("operation", operation.name.as_str()),
                        ("fallback", fallback.as_str()),
                    ],
                )
                .at(target),
            );
            fallback
        }
        None => default_channel_address(&operation.name),
    };

    let channel_key = channel
        .and_then(|c| c.name.clone())
        .unwrap_or_else(|| default_channel_key(&operation.name));

    let role = state.resolve_action(target);
    if role.conflict {
        sink.report(
            Diagnostic::new(
                DiagnosticCode::ConflictingOperationRole,
                &[("operation", operation.name.as_str())],
            )
            .at(target),
        );
    }

    let parameters = operation
        .parameters
        .iter()
        .map(|p| ParameterDescriptor {
            name: &p.name,
            ty: &p.ty,
            optional: p.optional,
            description: p.doc.as_deref(),
        })
        .collect();

    debug!(
        operation = target,
        channel = %channel_key,
        %address,
        action = %role.action,
        "described operation"
    );

    OperationDescriptor {
        name: &operation.name,
        qualified_name: discovered.qualified_name.clone(),
        parameters,
        return_type: operation.return_type.as_ref(),
        channel_key,
        address,
        channel_title: channel.and_then(|c| c.title.as_deref()),
        channel_description: channel.and_then(|c| c.description.as_deref()),
        action: role.action,
        description: operation.doc.as_deref(),
        protocol: state.protocol(target),
        message: state.message(target),
        security: state.security(target),
    }
}
