//! asyncbridge-validator - AsyncAPI 3.0 document validation
//!
//! Validation runs in two phases over the JSON form of a document:
//! - a structural check against an embedded AsyncAPI 3.0 schema
//!   (required fields, version constant, enums, basic types)
//! - semantic rules: every local `$ref` resolves, operations reference
//!   channels, channel messages reference components, binding versions match
//!
//! Validation never fails with `Err`. Unreadable or unparsable input becomes a
//! `file-error` or `parse-error` issue in the returned [`ValidationResult`].
//!
//! ```
//! use asyncbridge_validator::{DocumentValidator, IssueKind};
//! use serde_json::json;
//!
//! let result = DocumentValidator::new().validate(&json!({
//!     "info": { "title": "Orders", "version": "1.0.0" }
//! }));
//!
//! assert!(!result.valid);
//! assert!(result.has_error(IssueKind::RequiredField));
//! ```

mod cache;
mod issue;
mod semantic;
mod structural;
mod validator;

pub use cache::{ValidationCache, content_key};
pub use issue::{IssueKind, ValidationIssue, ValidationMetrics, ValidationResult};
pub use structural::ASYNCAPI_SCHEMA;
pub use validator::DocumentValidator;
