//! Supported transport protocols

use crate::BindingError;
use std::str::FromStr;

/// Closed set of transport protocols.
///
/// Only Kafka, WebSocket and HTTP(S) have binding builders; AMQP and MQTT are
/// recognized for detection and default ports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Protocol {
    Kafka,
    WebSocket,
    Http,
    Https,
    Amqp,
    Mqtt,
}

impl Protocol {
    pub const ALL: [Protocol; 6] = [
        Protocol::Kafka,
        Protocol::WebSocket,
        Protocol::Http,
        Protocol::Https,
        Protocol::Amqp,
        Protocol::Mqtt,
    ];

    /// Parse a protocol tag, accepting secure and short aliases.
    pub fn from_tag(tag: &str) -> Option<Protocol> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "kafka" | "kafka-secure" => Some(Protocol::Kafka),
            "ws" | "wss" | "websocket" | "websockets" => Some(Protocol::WebSocket),
            "http" => Some(Protocol::Http),
            "https" => Some(Protocol::Https),
            "amqp" | "amqps" => Some(Protocol::Amqp),
            "mqtt" | "mqtts" => Some(Protocol::Mqtt),
            _ => None,
        }
    }

    /// Detect the protocol from a URL scheme (`kafka://broker:9092`).
    pub fn from_url(url: &str) -> Option<Protocol> {
        let (scheme, _) = url.split_once("://")?;
        Protocol::from_tag(scheme)
    }

    pub fn default_port(self) -> u16 {
        match self {
            Protocol::Kafka => 9092,
            Protocol::WebSocket => 80,
            Protocol::Http => 80,
            Protocol::Https => 443,
            Protocol::Amqp => 5672,
            Protocol::Mqtt => 1883,
        }
    }

    /// Key of this protocol inside a `bindings` object.
    pub fn binding_key(self) -> &'static str {
        match self {
            Protocol::Kafka => "kafka",
            Protocol::WebSocket => "ws",
            Protocol::Http | Protocol::Https => "http",
            Protocol::Amqp => "amqp",
            Protocol::Mqtt => "mqtt",
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Protocol::Kafka => "kafka",
            Protocol::WebSocket => "websocket",
            Protocol::Http => "http",
            Protocol::Https => "https",
            Protocol::Amqp => "amqp",
            Protocol::Mqtt => "mqtt",
        }
    }
}

impl FromStr for Protocol {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Protocol::from_tag(s).ok_or_else(|| BindingError::UnknownProtocol(s.to_string()))
    }
}

impl std::fmt::Display for Protocol {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Suggest a protocol from the shape of a channel address.
///
/// Topic-shaped addresses (no leading slash, at least one `.`, `_` or `-`,
/// only alphanumerics plus those separators) suggest Kafka. This is a
/// best-effort guess, not an inference.
pub fn suggest_protocol(address: &str) -> Option<Protocol> {
    let is_separator = |c: char| matches!(c, '.' | '_' | '-');
    let topic_shaped = !address.is_empty()
        && !address.starts_with('/')
        && address.contains(is_separator)
        && address
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || is_separator(c));
    topic_shaped.then_some(Protocol::Kafka)
}
