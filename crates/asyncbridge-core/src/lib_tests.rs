#![allow(non_snake_case)]

use super::*;
use test_case::test_case;

// LogLevel tests

#[test]
fn LogLevel___ordering___trace_to_off_ascending() {
    assert!(LogLevel::Trace < LogLevel::Debug);
    assert!(LogLevel::Debug < LogLevel::Info);
    assert!(LogLevel::Info < LogLevel::Warn);
    assert!(LogLevel::Warn < LogLevel::Error);
    assert!(LogLevel::Error < LogLevel::Off);
}

#[test_case(0, LogLevel::Trace)]
#[test_case(2, LogLevel::Info)]
#[test_case(4, LogLevel::Error)]
#[test_case(5, LogLevel::Off)]
#[test_case(100, LogLevel::Off)]
fn LogLevel___from_u8___maps_value(value: u8, expected: LogLevel) {
    assert_eq!(LogLevel::from_u8(value), expected);
}

#[test]
fn LogLevel___as_u8___round_trips() {
    for level in [
        LogLevel::Trace,
        LogLevel::Debug,
        LogLevel::Info,
        LogLevel::Warn,
        LogLevel::Error,
        LogLevel::Off,
    ] {
        assert_eq!(LogLevel::from_u8(level as u8), level);
    }
}

#[test_case("info", LogLevel::Info)]
#[test_case("INFO", LogLevel::Info)]
#[test_case(" debug ", LogLevel::Debug)]
#[test_case("warning", LogLevel::Warn)]
#[test_case("off", LogLevel::Off)]
fn LogLevel___from_str___case_insensitive(input: &str, expected: LogLevel) {
    assert_eq!(input.parse::<LogLevel>().unwrap(), expected);
}

#[test]
fn LogLevel___from_str___unknown_is_config_error() {
    let result = "chatty".parse::<LogLevel>();

    assert!(matches!(result, Err(ConfigError::InvalidValue { .. })));
}

#[test]
fn LogLevel___display___shows_uppercase() {
    assert_eq!(LogLevel::Warn.to_string(), "WARN");
}
