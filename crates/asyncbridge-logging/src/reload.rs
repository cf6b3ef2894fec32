//! Runtime control of the installed level filter.

use asyncbridge_core::LogLevel;
use once_cell::sync::OnceCell;
use parking_lot::Mutex;
use tracing_subscriber::Registry;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::reload;

type FilterHandle = reload::Handle<LevelFilter, Registry>;

struct Installed {
    filter: FilterHandle,
    level: LogLevel,
}

/// Level control for the subscriber installed by [`init_logging`](crate::init_logging)
#[derive(Default)]
pub struct ReloadHandle {
    installed: Mutex<Option<Installed>>,
}

impl ReloadHandle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide instance used by `init_logging`
    pub fn global() -> &'static ReloadHandle {
        static GLOBAL: OnceCell<ReloadHandle> = OnceCell::new();
        GLOBAL.get_or_init(ReloadHandle::new)
    }

    /// Attach the filter handle of a freshly installed subscriber
    pub fn set_handle(&self, filter: FilterHandle, level: LogLevel) {
        *self.installed.lock() = Some(Installed { filter, level });
    }

    pub fn is_initialized(&self) -> bool {
        self.installed.lock().is_some()
    }

    /// Level currently applied, if a subscriber is attached
    pub fn level(&self) -> Option<LogLevel> {
        self.installed.lock().as_ref().map(|installed| installed.level)
    }

    /// Switch the installed filter to `level`
    pub fn reload_level(&self, level: LogLevel) -> Result<(), String> {
        let mut guard = self.installed.lock();
        let installed = guard
            .as_mut()
            .ok_or_else(|| "no subscriber installed; call init_logging first".to_string())?;
        installed
            .filter
            .reload(level_filter(level))
            .map_err(|err| format!("level filter could not be reloaded: {err}"))?;
        installed.level = level;
        Ok(())
    }
}

pub(crate) fn level_filter(level: LogLevel) -> LevelFilter {
    match level {
        LogLevel::Trace => LevelFilter::TRACE,
        LogLevel::Debug => LevelFilter::DEBUG,
        LogLevel::Info => LevelFilter::INFO,
        LogLevel::Warn => LevelFilter::WARN,
        LogLevel::Error => LevelFilter::ERROR,
        LogLevel::Off => LevelFilter::OFF,
    }
}
