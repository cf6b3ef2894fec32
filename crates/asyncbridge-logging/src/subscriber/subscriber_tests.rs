#![allow(non_snake_case)]

use super::*;

// Only one test may touch the global subscriber per process.
#[test]
fn init_logging___second_call___keeps_first_subscriber_and_reloads() {
    let first = init_logging(LogLevel::Info);
    let second = init_logging(LogLevel::Debug);

    assert!(first);
    assert!(!second);
    assert!(ReloadHandle::global().is_initialized());
    assert_eq!(ReloadHandle::global().level(), Some(LogLevel::Debug));
    assert!(ReloadHandle::global().reload_level(LogLevel::Warn).is_ok());
    assert_eq!(ReloadHandle::global().level(), Some(LogLevel::Warn));
}
