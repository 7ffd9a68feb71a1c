use crate::domain::logging::{Clock, LogEntry, LogLevel, Logger, get_clock};
use wasm_bindgen::JsValue;

/// Writes entries to the browser console, one console method per level.
pub struct ConsoleLogger {
    min_level: LogLevel,
}

impl ConsoleLogger {
    pub fn new(min_level: LogLevel) -> Self {
        Self { min_level }
    }

    pub fn new_production() -> Self {
        Self::new(LogLevel::Info)
    }

    pub fn new_development() -> Self {
        Self::new(LogLevel::Debug)
    }

    fn format_entry(entry: &LogEntry) -> String {
        let timestamp = get_clock().format_millis(entry.timestamp);
        format!("[{}] {} {} | {}", timestamp, entry.level, entry.component, entry.message)
    }
}

impl Logger for ConsoleLogger {
    fn log(&self, entry: LogEntry) {
        if entry.level < self.min_level {
            return;
        }
        let line = JsValue::from(Self::format_entry(&entry));
        match entry.level {
            LogLevel::Trace | LogLevel::Debug => web_sys::console::debug_1(&line),
            LogLevel::Info => web_sys::console::info_1(&line),
            LogLevel::Warn => web_sys::console::warn_1(&line),
            LogLevel::Error => web_sys::console::error_1(&line),
        }
    }
}

/// `js_sys::Date` backed clock
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

impl BrowserClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for BrowserClock {
    fn now_millis(&self) -> u64 {
        js_sys::Date::now() as u64
    }

    fn format_millis(&self, millis: u64) -> String {
        let date = js_sys::Date::new(&(millis as f64).into());
        format!(
            "{:02}:{:02}:{:02}.{:03}",
            date.get_hours(),
            date.get_minutes(),
            date.get_seconds(),
            date.get_milliseconds()
        )
    }
}
