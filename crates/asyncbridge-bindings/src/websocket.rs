//! WebSocket bindings

use crate::binding::{check_one_of, check_schema_object};
use crate::{BindingLevel, BindingReport, Protocol, ProtocolBinding};
use asyncbridge_core::document::WEBSOCKET_BINDING_VERSION;
use asyncbridge_core::state::BindingConfig;

const CHANNEL_FIELDS: &[&str] = &["method", "query", "headers"];
const HANDSHAKE_METHODS: &[&str] = &["GET", "POST"];

/// WebSocket binding builder and rule table.
///
/// Only channels carry WebSocket binding fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct WebSocketBinding;

impl ProtocolBinding for WebSocketBinding {
    fn protocol(&self) -> Protocol {
        Protocol::WebSocket
    }

    fn version(&self) -> &'static str {
        WEBSOCKET_BINDING_VERSION
    }

    fn supported_fields(&self, level: BindingLevel) -> &'static [&'static str] {
        match level {
            BindingLevel::Channel => CHANNEL_FIELDS,
            _ => &[],
        }
    }

    fn check(&self, level: BindingLevel, config: &BindingConfig, report: &mut BindingReport) {
        if level != BindingLevel::Channel {
            return;
        }
        check_one_of(report, config, "method", HANDSHAKE_METHODS);
        check_schema_object(report, config, "query", true);
        check_schema_object(report, config, "headers", true);
    }
}
