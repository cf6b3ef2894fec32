//! Global subscriber installation

use crate::reload::{ReloadHandle, level_filter};
use asyncbridge_core::LogLevel;
use tracing_subscriber::{fmt, reload};

/// Install the global `tracing` subscriber at the given level
///
/// Output goes to stderr through a `fmt` layer behind a reloadable level
/// filter. Only the first call installs a subscriber; later calls adjust the
/// level of the installed one. Returns `true` when this call installed it.
pub fn init_logging(level: LogLevel) -> bool {
    use tracing_subscriber::prelude::*;

    let (filter, handle) = reload::Layer::new(level_filter(level));
    let subscriber = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false));

    match tracing::subscriber::set_global_default(subscriber) {
        Ok(()) => {
            ReloadHandle::global().set_handle(handle, level);
            true
        }
        Err(_) => {
            // Already installed elsewhere; keep it, just honor the level
            let _ = ReloadHandle::global().reload_level(level);
            false
        }
    }
}

#[cfg(test)]
#[path = "subscriber/subscriber_tests.rs"]
mod subscriber_tests;
