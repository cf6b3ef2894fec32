//! Extension lifecycle state machine

use serde::{Deserialize, Serialize};

/// Extension lifecycle states
///
/// State transitions:
/// ```text
/// Unregistered → Registered → Initialized → Active → Shutdown
///                    Any non-terminal state → Failed (on error)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtensionState {
    /// Extension exists but is not held by a registry
    #[default]
    Unregistered,
    /// Extension is held by a registry but not initialized
    Registered,
    /// Extension accepted its configuration
    Initialized,
    /// Extension may be executed
    Active,
    /// Extension has been shut down
    Shutdown,
    /// Extension failed and will not run again
    Failed,
}

impl ExtensionState {
    /// Check if this state can transition to the target state
    pub fn can_transition_to(&self, target: ExtensionState) -> bool {
        use ExtensionState::*;
        matches!(
            (self, target),
            (Unregistered, Registered)
                | (Registered, Initialized)
                | (Initialized, Active)
                | (Active, Shutdown)
                // Shutdown is allowed before activation too
                | (Registered, Shutdown)
                | (Initialized, Shutdown)
                | (Registered, Failed)
                | (Initialized, Failed)
                | (Active, Failed)
        )
    }

    /// Check if the extension can be executed in this state
    pub fn can_execute(&self) -> bool {
        matches!(self, ExtensionState::Active)
    }

    /// Check if the extension is in a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, ExtensionState::Shutdown | ExtensionState::Failed)
    }

    pub fn description(&self) -> &'static str {
        match self {
            ExtensionState::Unregistered => "Extension is not registered",
            ExtensionState::Registered => "Extension is registered but not initialized",
            ExtensionState::Initialized => "Extension is initialized",
            ExtensionState::Active => "Extension is active",
            ExtensionState::Shutdown => "Extension has shut down",
            ExtensionState::Failed => "Extension has failed",
        }
    }
}

impl std::fmt::Display for ExtensionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExtensionState::Unregistered => write!(f, "Unregistered"),
            ExtensionState::Registered => write!(f, "Registered"),
            ExtensionState::Initialized => write!(f, "Initialized"),
            ExtensionState::Active => write!(f, "Active"),
            ExtensionState::Shutdown => write!(f, "Shutdown"),
            ExtensionState::Failed => write!(f, "Failed"),
        }
    }
}


#[cfg(test)]
#[path = "lifecycle/lifecycle_parameterized_tests.rs"]
mod lifecycle_parameterized_tests;
