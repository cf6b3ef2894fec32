#![allow(non_snake_case)]

use super::*;
use asyncbridge_core::document::{Action, Channel, Info, Operation, Reference};
use asyncbridge_core::{Diagnostics, ExtensionConfig, ExtensionRegistry};

fn document() -> AsyncApiDocument {
    let mut document = AsyncApiDocument::new(Info::new("T", "1.0"));
    let mut documented = Channel::new("/a");
    documented.description = Some("Channel A".to_string());
    document.channels.insert("a".to_string(), documented);
    document.channels.insert("b".to_string(), Channel::new("/b"));
    document.operations.insert(
        "sendB".to_string(),
        Operation {
            action: Action::Send,
            channel: Reference::channel("b"),
            title: None,
            summary: None,
            description: Some("  ".to_string()),
            messages: Vec::new(),
            security: Vec::new(),
            bindings: None,
        },
    );
    document
}

#[test]
fn DocumentationLint___reports_undocumented_operations_and_channels() {
    let diagnostics = DocumentationLint.execute(&document()).unwrap();

    let targets: Vec<_> = diagnostics
        .iter()
        .filter_map(|d| d.target.as_deref())
        .collect();
    assert_eq!(targets, ["operations.sendB", "channels.b"]);
    assert!(diagnostics.iter().all(|d| !d.is_error()));
}

#[test]
fn DocumentationLint___runs_through_registry() {
    let mut registry = ExtensionRegistry::new();
    registry
        .register(Box::new(DocumentationLint), ExtensionConfig::new())
        .unwrap();
    let mut sink = Diagnostics::new();

    registry.start_all(&mut sink);
    let executed = registry.execute_all(ExtensionKind::Lint, &document(), &mut sink);

    assert_eq!(executed, 1);
    assert_eq!(sink.len(), 2);
}
