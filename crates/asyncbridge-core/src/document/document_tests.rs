#![allow(non_snake_case)]

use super::*;
use serde_json::json;

fn sample_document() -> AsyncApiDocument {
    let mut document = AsyncApiDocument::new(Info::new("Chat", "1.0.0"));
    document
        .components
        .schemas
        .insert("ChatMessage".to_string(), SchemaNode::default());
    document.components.messages.insert(
        "sendMessage".to_string(),
        Message {
            name: "sendMessage".to_string(),
            title: None,
            summary: None,
            description: None,
            content_type: None,
            payload: Reference::schema("ChatMessage"),
            bindings: None,
        },
    );
    let mut channel = Channel::new("/chat");
    channel
        .messages
        .insert("sendMessage".to_string(), Reference::message("sendMessage"));
    document.channels.insert("channel_send".to_string(), channel);
    document.operations.insert(
        "send".to_string(),
        Operation {
            action: Action::Send,
            channel: Reference::channel("channel_send"),
            title: None,
            summary: None,
            description: None,
            messages: vec![Reference::channel_message("channel_send", "sendMessage")],
            security: Vec::new(),
            bindings: None,
        },
    );
    document
}

#[test]
fn AsyncApiDocument___new___uses_fixed_version() {
    let document = AsyncApiDocument::new(Info::new("Chat", "1.0.0"));

    assert_eq!(document.asyncapi, ASYNCAPI_VERSION);
    assert!(document.channels.is_empty());
}

#[test]
fn AsyncApiDocument___serialize___omits_empty_sections() {
    let document = AsyncApiDocument::new(Info::new("Chat", "1.0.0"));

    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(
        value,
        json!({ "asyncapi": "3.0.0", "info": { "title": "Chat", "version": "1.0.0" } })
    );
}

#[test]
fn AsyncApiDocument___serialize___component_keys_are_camel_case() {
    let mut document = AsyncApiDocument::new(Info::new("Chat", "1.0.0"));
    document.components.security_schemes.insert(
        "token".to_string(),
        SecurityScheme::bearer("JWT"),
    );

    let value = serde_json::to_value(&document).unwrap();

    assert_eq!(
        value["components"]["securitySchemes"]["token"]["bearerFormat"],
        json!("JWT")
    );
}

#[test]
fn AsyncApiDocument___json_round_trip___is_identical() {
    let document = sample_document();

    let text = serde_json::to_string(&document).unwrap();
    let parsed: AsyncApiDocument = serde_json::from_str(&text).unwrap();

    assert_eq!(parsed, document);
}

#[test]
fn AsyncApiDocument___resolves___known_shapes() {
    let document = sample_document();

    assert!(document.resolves(&Reference::channel("channel_send")));
    assert!(document.resolves(&Reference::channel_message("channel_send", "sendMessage")));
    assert!(document.resolves(&Reference::message("sendMessage")));
    assert!(document.resolves(&Reference::schema("ChatMessage")));
}

#[test]
fn AsyncApiDocument___resolves___missing_targets_fail() {
    let document = sample_document();

    assert!(!document.resolves(&Reference::channel("channel_other")));
    assert!(!document.resolves(&Reference::channel_message("channel_send", "other")));
    assert!(!document.resolves(&Reference::security_scheme("token")));
    assert!(!document.resolves(&Reference::new("https://example.com/schema.json")));
}

#[test]
fn Reference___segments___splits_local_path() {
    let reference = Reference::channel_message("a", "b");

    assert_eq!(reference.segments(), Some(vec!["channels", "a", "messages", "b"]));
}

#[test]
fn Action___display___lowercase() {
    assert_eq!(Action::Send.to_string(), "send");
    assert_eq!(Action::Receive.to_string(), "receive");
}
