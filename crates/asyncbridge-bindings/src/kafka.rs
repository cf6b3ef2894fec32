//! Kafka bindings

use crate::binding::{
    check_one_of, check_positive_integer, check_schema_object, check_string,
};
use crate::{BindingLevel, BindingReport, Protocol, ProtocolBinding};
use asyncbridge_core::document::KAFKA_BINDING_VERSION;
use asyncbridge_core::state::BindingConfig;
use once_cell::sync::Lazy;
use regex::Regex;

#[allow(clippy::unwrap_used)] // Safe: literal pattern
static TOPIC_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap());

/// Longest topic name Kafka accepts.
pub const MAX_TOPIC_LENGTH: usize = 249;

pub const PARTITION_WARNING_THRESHOLD: i64 = 1000;
pub const REPLICA_WARNING_THRESHOLD: i64 = 10;

const SERVER_FIELDS: &[&str] = &["schemaRegistryUrl", "schemaRegistryVendor"];
const CHANNEL_FIELDS: &[&str] = &["topic", "partitions", "replicas", "topicConfiguration"];
const OPERATION_FIELDS: &[&str] = &["groupId", "clientId"];
const MESSAGE_FIELDS: &[&str] = &[
    "key",
    "schemaIdLocation",
    "schemaIdPayloadEncoding",
    "schemaLookupStrategy",
];

const CLEANUP_POLICIES: &[&str] = &["delete", "compact"];
const SCHEMA_ID_LOCATIONS: &[&str] = &["header", "payload"];
const SCHEMA_LOOKUP_STRATEGIES: &[&str] =
    &["TopicIdStrategy", "RecordIdStrategy", "TopicRecordIdStrategy"];

/// Kafka binding builder and rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct KafkaBinding;

impl ProtocolBinding for KafkaBinding {
    fn protocol(&self) -> Protocol {
        Protocol::Kafka
    }

    fn version(&self) -> &'static str {
        KAFKA_BINDING_VERSION
    }

    fn supported_fields(&self, level: BindingLevel) -> &'static [&'static str] {
        match level {
            BindingLevel::Server => SERVER_FIELDS,
            BindingLevel::Channel => CHANNEL_FIELDS,
            BindingLevel::Operation => OPERATION_FIELDS,
            BindingLevel::Message => MESSAGE_FIELDS,
        }
    }

    fn check(&self, level: BindingLevel, config: &BindingConfig, report: &mut BindingReport) {
        match level {
            BindingLevel::Server => check_server(config, report),
            BindingLevel::Channel => check_channel(config, report),
            BindingLevel::Operation => {
                check_schema_object(report, config, "groupId", false);
                check_schema_object(report, config, "clientId", false);
            }
            BindingLevel::Message => {
                check_schema_object(report, config, "key", false);
                check_one_of(report, config, "schemaIdLocation", SCHEMA_ID_LOCATIONS);
                check_string(report, config, "schemaIdPayloadEncoding");
                check_one_of(report, config, "schemaLookupStrategy", SCHEMA_LOOKUP_STRATEGIES);
            }
        }
    }
}

fn check_server(config: &BindingConfig, report: &mut BindingReport) {
    if let Some(url) = config.get("schemaRegistryUrl") {
        let is_http = url
            .as_str()
            .is_some_and(|u| u.starts_with("http://") || u.starts_with("https://"));
        if !is_http {
            report.error(format!("schemaRegistryUrl must be an http(s) URL, got {url}"));
        }
    }
    check_string(report, config, "schemaRegistryVendor");
}

fn check_channel(config: &BindingConfig, report: &mut BindingReport) {
    if let Some(topic) = config.get("topic") {
        match topic.as_str() {
            Some(name) => check_topic_name(name, report),
            None => report.error(format!("topic must be a string, got {topic}")),
        }
    }
    check_positive_integer(report, config, "partitions", PARTITION_WARNING_THRESHOLD);
    check_positive_integer(report, config, "replicas", REPLICA_WARNING_THRESHOLD);

    if let Some(topic_config) = config.get("topicConfiguration") {
        match topic_config.as_object() {
            Some(settings) => check_topic_configuration(settings, report),
            None => report.error("topicConfiguration must be an object"),
        }
    }
}

/// Check a topic name against Kafka's naming rules.
pub fn check_topic_name(name: &str, report: &mut BindingReport) {
    if name.is_empty() {
        report.error("topic must not be empty");
        return;
    }
    if name.len() > MAX_TOPIC_LENGTH {
        report.error(format!(
            "topic '{name}' is {} characters long; the maximum is {MAX_TOPIC_LENGTH}",
            name.len()
        ));
    }
    if !TOPIC_PATTERN.is_match(name) {
        report.error(format!(
            "topic '{name}' may only contain letters, digits, '.', '_' and '-'"
        ));
    }
}

fn check_topic_configuration(settings: &BindingConfig, report: &mut BindingReport) {
    if let Some(policy) = settings.get("cleanup.policy") {
        let valid = policy.as_array().is_some_and(|entries| {
            entries
                .iter()
                .all(|p| p.as_str().is_some_and(|p| CLEANUP_POLICIES.contains(&p)))
        });
        if !valid {
            report.error(format!(
                "topicConfiguration.cleanup.policy must be a list drawn from {}, got {policy}",
                CLEANUP_POLICIES.join(", ")
            ));
        }
    }
    for field in ["retention.ms", "retention.bytes", "delete.retention.ms"] {
        if let Some(value) = settings.get(field)
            && value.as_i64().is_none_or(|n| n < -1)
        {
            report.error(format!(
                "topicConfiguration.{field} must be an integer >= -1, got {value}"
            ));
        }
    }
    if let Some(value) = settings.get("max.message.bytes")
        && value.as_i64().is_none_or(|n| n < 1)
    {
        report.error(format!(
            "topicConfiguration.max.message.bytes must be a positive integer, got {value}"
        ));
    }
}

#[cfg(test)]
#[path = "kafka/kafka_tests.rs"]
mod kafka_tests;
