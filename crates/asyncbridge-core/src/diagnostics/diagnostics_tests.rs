#![allow(non_snake_case)]

use super::*;
use std::collections::HashSet;
use test_case::test_case;

#[test]
fn DiagnosticCode___code___is_namespaced() {
    let code = DiagnosticCode::DuplicateChannelId.code();

    assert_eq!(code, "asyncbridge/duplicate-channel-id");
}

#[test]
fn DiagnosticCode___all_variants___have_unique_names() {
    let names: HashSet<_> = DiagnosticCode::ALL.iter().map(|c| c.name()).collect();

    assert_eq!(names.len(), DiagnosticCode::ALL.len());
}

#[test]
fn DiagnosticCode___serialize___matches_name() {
    for code in DiagnosticCode::ALL {
        let value = serde_json::to_value(code).unwrap();

        assert_eq!(value, serde_json::Value::String(code.name().to_string()));
    }
}

#[test_case(DiagnosticCode::MissingChannelPath, Severity::Warning)]
#[test_case(DiagnosticCode::ConflictingOperationRole, Severity::Error)]
#[test_case(DiagnosticCode::DuplicateChannelId, Severity::Error)]
#[test_case(DiagnosticCode::DuplicateServerName, Severity::Error)]
#[test_case(DiagnosticCode::InvalidProtocolType, Severity::Error)]
#[test_case(DiagnosticCode::BindingWarning, Severity::Warning)]
#[test_case(DiagnosticCode::UnsupportedType, Severity::Warning)]
#[test_case(DiagnosticCode::MissingDocumentation, Severity::Warning)]
#[test_case(DiagnosticCode::SchemaNameCollision, Severity::Error)]
#[test_case(DiagnosticCode::DuplicateMessageName, Severity::Error)]
#[test_case(DiagnosticCode::InvalidBinding, Severity::Error)]
fn DiagnosticCode___severity___matches_catalog(code: DiagnosticCode, expected: Severity) {
    assert_eq!(code.severity(), expected);
}

#[test_case(DiagnosticCode::DuplicateChannelId, true ; "duplicate channel blocks")]
#[test_case(DiagnosticCode::DuplicateMessageName, true ; "duplicate message blocks")]
#[test_case(DiagnosticCode::InvalidBinding, false ; "invalid binding only drops the binding")]
#[test_case(DiagnosticCode::BindingWarning, false ; "warnings never block")]
fn DiagnosticCode___blocks_emission___errors_except_invalid_binding(code: DiagnosticCode, expected: bool) {
    assert_eq!(code.blocks_emission(), expected);
}

#[test]
fn DiagnosticCode___render___fills_placeholders() {
    let message = DiagnosticCode::DuplicateChannelId
        .render(&[("channel", "channel_send"), ("existing", "Chat.send")]);

    assert_eq!(
        message,
        "Channel id 'channel_send' is already used by operation 'Chat.send'."
    );
}

#[test]
fn DiagnosticCode___render___missing_argument_left_in_place() {
    let message = DiagnosticCode::InvalidProtocolType.render(&[]);

    assert_eq!(message, "Protocol '{protocol}' is not supported.");
}

#[test]
fn Diagnostic___new___takes_severity_from_code() {
    let diagnostic = Diagnostic::new(
        DiagnosticCode::MissingChannelPath,
        &[("operation", "send"), ("fallback", "/send")],
    )
    .at("Chat.send");

    assert_eq!(diagnostic.severity, Severity::Warning);
    assert!(!diagnostic.is_error());
    assert_eq!(diagnostic.target.as_deref(), Some("Chat.send"));
}

#[test]
fn Diagnostic___display___includes_code_and_severity() {
    let diagnostic = Diagnostic::new(DiagnosticCode::DuplicateServerName, &[("server", "prod")]);

    assert_eq!(
        diagnostic.to_string(),
        "error [asyncbridge/duplicate-server-name]: Server name 'prod' is declared more than once."
    );
}

#[test]
fn Diagnostics___report___splits_errors_and_warnings() {
    let mut diagnostics = Diagnostics::new();

    diagnostics.report(Diagnostic::new(DiagnosticCode::BindingWarning, &[]));
    diagnostics.report(Diagnostic::new(DiagnosticCode::DuplicateOperationId, &[]));

    assert!(diagnostics.has_errors());
    assert_eq!(diagnostics.errors().count(), 1);
    assert_eq!(diagnostics.warnings().count(), 1);
    assert!(diagnostics.contains(DiagnosticCode::DuplicateOperationId));
    assert!(!diagnostics.contains(DiagnosticCode::InvalidBinding));
}

#[test]
fn Diagnostics___only_warnings___has_no_errors() {
    let mut diagnostics = Diagnostics::new();

    diagnostics.report(Diagnostic::new(DiagnosticCode::MissingDocumentation, &[]));

    assert!(!diagnostics.has_errors());
    assert_eq!(diagnostics.len(), 1);
}

#[test]
fn Diagnostics___invalid_binding_only___has_errors_but_none_blocking() {
    let mut diagnostics = Diagnostics::new();

    diagnostics.report(Diagnostic::new(DiagnosticCode::InvalidBinding, &[]));

    assert!(diagnostics.has_errors());
    assert!(!diagnostics.has_blocking());
}

#[test]
fn Diagnostics___duplicate_operation___is_blocking() {
    let mut diagnostics = Diagnostics::new();

    diagnostics.report(Diagnostic::new(DiagnosticCode::InvalidBinding, &[]));
    diagnostics.report(Diagnostic::new(DiagnosticCode::DuplicateOperationId, &[]));

    assert!(diagnostics.has_blocking());
}
