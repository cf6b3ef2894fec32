//! HTTP bindings, shared by `http` and `https`

use crate::binding::{check_integer_range, check_one_of, check_schema_object};
use crate::{BindingLevel, BindingReport, Protocol, ProtocolBinding};
use asyncbridge_core::document::HTTP_BINDING_VERSION;
use asyncbridge_core::state::BindingConfig;

const OPERATION_FIELDS: &[&str] = &["type", "method", "query", "statusCode"];
const MESSAGE_FIELDS: &[&str] = &["headers", "statusCode"];

const OPERATION_TYPES: &[&str] = &["request", "response"];
const METHODS: &[&str] = &[
    "GET", "PUT", "POST", "PATCH", "DELETE", "HEAD", "OPTIONS", "CONNECT", "TRACE",
];

/// HTTP binding builder and rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct HttpBinding;

impl ProtocolBinding for HttpBinding {
    fn protocol(&self) -> Protocol {
        Protocol::Http
    }

    fn version(&self) -> &'static str {
        HTTP_BINDING_VERSION
    }

    fn supported_fields(&self, level: BindingLevel) -> &'static [&'static str] {
        match level {
            BindingLevel::Operation => OPERATION_FIELDS,
            BindingLevel::Message => MESSAGE_FIELDS,
            _ => &[],
        }
    }

    fn check(&self, level: BindingLevel, config: &BindingConfig, report: &mut BindingReport) {
        match level {
            BindingLevel::Operation => {
                check_one_of(report, config, "type", OPERATION_TYPES);
                check_one_of(report, config, "method", METHODS);
                if config.get("type").and_then(|t| t.as_str()) == Some("request")
                    && !config.contains_key("method")
                {
                    report.warning("request operation has no method");
                }
                check_integer_range(report, config, "statusCode", 100, 599);
                check_schema_object(report, config, "query", true);
            }
            BindingLevel::Message => {
                check_schema_object(report, config, "headers", true);
                check_integer_range(report, config, "statusCode", 100, 599);
            }
            _ => {}
        }
    }
}
