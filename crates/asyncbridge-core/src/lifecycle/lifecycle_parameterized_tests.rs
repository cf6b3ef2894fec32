#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// ============================================================================
// Parameterized valid transitions
// ============================================================================

#[test_case(ExtensionState::Unregistered, ExtensionState::Registered)]
#[test_case(ExtensionState::Registered, ExtensionState::Initialized)]
#[test_case(ExtensionState::Initialized, ExtensionState::Active)]
#[test_case(ExtensionState::Active, ExtensionState::Shutdown)]
#[test_case(ExtensionState::Registered, ExtensionState::Shutdown)]
#[test_case(ExtensionState::Initialized, ExtensionState::Shutdown)]
#[test_case(ExtensionState::Registered, ExtensionState::Failed)]
#[test_case(ExtensionState::Initialized, ExtensionState::Failed)]
#[test_case(ExtensionState::Active, ExtensionState::Failed)]
fn ExtensionState___valid_transitions___allowed(from: ExtensionState, to: ExtensionState) {
    assert!(
        from.can_transition_to(to),
        "{:?} should transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized invalid transitions
// ============================================================================

#[test_case(ExtensionState::Unregistered, ExtensionState::Initialized)]
#[test_case(ExtensionState::Unregistered, ExtensionState::Active)]
#[test_case(ExtensionState::Unregistered, ExtensionState::Failed)]
#[test_case(ExtensionState::Registered, ExtensionState::Active)]
#[test_case(ExtensionState::Active, ExtensionState::Initialized)]
#[test_case(ExtensionState::Active, ExtensionState::Registered)]
#[test_case(ExtensionState::Shutdown, ExtensionState::Active)]
#[test_case(ExtensionState::Shutdown, ExtensionState::Registered)]
#[test_case(ExtensionState::Shutdown, ExtensionState::Failed)]
#[test_case(ExtensionState::Failed, ExtensionState::Active)]
#[test_case(ExtensionState::Failed, ExtensionState::Failed)]
fn ExtensionState___invalid_transitions___not_allowed(from: ExtensionState, to: ExtensionState) {
    assert!(
        !from.can_transition_to(to),
        "{:?} should not transition to {:?}",
        from,
        to
    );
}

// ============================================================================
// Parameterized can_execute tests
// ============================================================================

#[test_case(ExtensionState::Unregistered, false)]
#[test_case(ExtensionState::Registered, false)]
#[test_case(ExtensionState::Initialized, false)]
#[test_case(ExtensionState::Active, true)]
#[test_case(ExtensionState::Shutdown, false)]
#[test_case(ExtensionState::Failed, false)]
fn ExtensionState___can_execute___only_active(state: ExtensionState, expected: bool) {
    assert_eq!(state.can_execute(), expected);
}
