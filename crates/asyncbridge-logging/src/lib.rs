//! asyncbridge-logging - Tracing setup for asyncbridge
//!
//! This crate provides:
//! - [`init_logging`] to install a stderr `fmt` subscriber with a reloadable level
//! - [`ReloadHandle`] to change the level at runtime
//! - [`TracingSink`] to report diagnostics through `tracing`

mod reload;
mod sink;
mod subscriber;

pub use asyncbridge_core::LogLevel;
pub use reload::ReloadHandle;
pub use sink::TracingSink;
pub use subscriber::init_logging;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{LogLevel, ReloadHandle, TracingSink, init_logging};
}
