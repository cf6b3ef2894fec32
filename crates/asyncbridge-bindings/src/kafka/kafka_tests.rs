#![allow(non_snake_case)]

use super::*;
use serde_json::{Value, json};
use test_case::test_case;

fn config(value: Value) -> BindingConfig {
    match value {
        Value::Object(map) => map,
        other => panic!("expected object, got {other}"),
    }
}

#[test]
fn KafkaBinding___valid_channel___no_errors() {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({ "topic": "user.events", "partitions": 12, "replicas": 3 })),
    );

    assert!(report.is_valid());
    assert!(report.warnings.is_empty());
}

#[test]
fn KafkaBinding___negative_partitions___positive_integer_error() {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({ "partitions": -1 })),
    );

    assert!(!report.is_valid());
    assert!(report.errors.iter().any(|e| e.contains("positive integer")));
}

#[test_case(json!(0))]
#[test_case(json!(1.5))]
#[test_case(json!("3"))]
fn KafkaBinding___non_positive_replicas___error(replicas: Value) {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({ "replicas": replicas })),
    );

    assert_eq!(report.errors.len(), 1);
}

#[test]
fn KafkaBinding___many_partitions___warning_only() {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({ "partitions": 5000, "replicas": 20 })),
    );

    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 2);
}

#[test_case("user events", false)]
#[test_case("user/events", false)]
#[test_case("orders.v1_created-2", true)]
fn KafkaBinding___topic_characters___checked(topic: &str, valid: bool) {
    let report = KafkaBinding.validate(BindingLevel::Channel, &config(json!({ "topic": topic })));

    assert_eq!(report.is_valid(), valid);
}

#[test]
fn KafkaBinding___topic_too_long___error() {
    let topic = "a".repeat(MAX_TOPIC_LENGTH + 1);

    let report = KafkaBinding.validate(BindingLevel::Channel, &config(json!({ "topic": topic })));

    assert!(report.errors.iter().any(|e| e.contains("maximum is 249")));
}

#[test]
fn KafkaBinding___topic_at_limit___valid() {
    let topic = "a".repeat(MAX_TOPIC_LENGTH);

    let report = KafkaBinding.validate(BindingLevel::Channel, &config(json!({ "topic": topic })));

    assert!(report.is_valid());
}

#[test]
fn KafkaBinding___topic_configuration___checks_policy_and_retention() {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({
            "topicConfiguration": {
                "cleanup.policy": ["delete", "archive"],
                "retention.ms": -2,
                "retention.bytes": -1
            }
        })),
    );

    assert_eq!(report.errors.len(), 2);
}

#[test_case("header", true)]
#[test_case("payload", true)]
#[test_case("footer", false)]
fn KafkaBinding___schema_id_location___checked(location: &str, valid: bool) {
    let report = KafkaBinding.validate(
        BindingLevel::Message,
        &config(json!({ "schemaIdLocation": location })),
    );

    assert_eq!(report.is_valid(), valid);
}

#[test_case("TopicIdStrategy", true)]
#[test_case("RecordIdStrategy", true)]
#[test_case("TopicRecordIdStrategy", true)]
#[test_case("RandomStrategy", false)]
fn KafkaBinding___schema_lookup_strategy___checked(strategy: &str, valid: bool) {
    let report = KafkaBinding.validate(
        BindingLevel::Message,
        &config(json!({ "schemaLookupStrategy": strategy })),
    );

    assert_eq!(report.is_valid(), valid);
}

#[test]
fn KafkaBinding___operation_group_id_not_schema___error() {
    let report = KafkaBinding.validate(
        BindingLevel::Operation,
        &config(json!({ "groupId": "my-group" })),
    );

    assert_eq!(report.errors, vec!["groupId must be a schema object".to_string()]);
}

#[test]
fn KafkaBinding___server_registry_url___must_be_http() {
    let report = KafkaBinding.validate(
        BindingLevel::Server,
        &config(json!({ "schemaRegistryUrl": "ftp://registry" })),
    );

    assert!(!report.is_valid());
}

#[test]
fn KafkaBinding___unknown_field___warning() {
    let report = KafkaBinding.validate(
        BindingLevel::Channel,
        &config(json!({ "topic": "a.b", "compression": "gzip" })),
    );

    assert!(report.is_valid());
    assert_eq!(report.warnings.len(), 1);
    assert!(report.warnings[0].contains("compression"));
}

#[test]
fn KafkaBinding___build___drops_unknown_and_stamps_version() {
    let binding = KafkaBinding.build(
        BindingLevel::Channel,
        &config(json!({ "topic": "a.b", "compression": "gzip" })),
    );

    assert_eq!(
        Value::Object(binding),
        json!({ "topic": "a.b", "bindingVersion": "0.5.0" })
    );
}
