//! Naming helpers for generated component keys.

/// Convert a name to PascalCase.
///
/// Handles camelCase, snake_case and kebab-case input.
///
/// # Examples
///
/// ```
/// use asyncbridge_emitter::naming::to_pascal_case;
///
/// assert_eq!(to_pascal_case("sendMessage"), "SendMessage");
/// assert_eq!(to_pascal_case("user_created"), "UserCreated");
/// assert_eq!(to_pascal_case("order-placed"), "OrderPlaced");
/// ```
pub fn to_pascal_case(s: &str) -> String {
    s.split(['-', '_', '.', ' '])
        .map(capitalize)
        .collect()
}

/// Capitalize the first letter of a string.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().chain(chars).collect(),
    }
}

/// Default channel key for an operation.
pub fn default_channel_key(operation: &str) -> String {
    format!("channel_{operation}")
}

/// Default channel address for an operation.
pub fn default_channel_address(operation: &str) -> String {
    format!("/{}", operation.to_lowercase())
}

/// Default message key for an operation.
pub fn default_message_name(operation: &str) -> String {
    format!("{operation}Message")
}

/// Component key for an operation's anonymous payload.
pub fn payload_schema_name(operation: &str) -> String {
    format!("{}Payload", to_pascal_case(operation))
}
