use log::{Level, LevelFilter, Log, Metadata, Record};
use wasm_bindgen::prelude::*;


// Forwards `log` records to the browser developer console.
struct WebLogger;

static LOGGER: WebLogger = WebLogger;

impl Log for WebLogger {
    fn enabled(&self, metadata: &Metadata) -> bool { metadata.level() <= log::max_level() }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = JsValue::from_str(&format!("[{}] {}", record.target(), record.args()));
        match record.level() {
            Level::Error => web_sys::console::error_1(&message),
            Level::Warn => web_sys::console::warn_1(&message),
            Level::Info => web_sys::console::info_1(&message),
            Level::Debug | Level::Trace => web_sys::console::debug_1(&message),
        }
    }

    fn flush(&self) {}
}

// Accepts the same level names as `RUST_LOG` ("error", "warn", "info", "debug", "trace", "off").
#[wasm_bindgen]
pub fn init_logging(level: &str) {
    let level = level.parse().unwrap_or(LevelFilter::Info);
    // Setting the logger fails only if it was set before; the level can still change.
    let _ = log::set_logger(&LOGGER);
    log::set_max_level(level);
}
