use serde_json::{Map, Number, Value};

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warn,
}

impl LogLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "debug" => Some(Self::Debug),
            "info" => Some(Self::Info),
            "warn" => Some(Self::Warn),
            _ => None,
        }
    }
}

/// Writes one JSON object per event to the browser console (stderr on the
/// host). Events below `level` are dropped.
#[derive(Clone, Copy, Debug)]
pub struct Logger {
    level: LogLevel,
}

impl Logger {
    pub fn new(level: LogLevel) -> Self {
        Self { level }
    }

    pub fn enabled(&self, level: LogLevel) -> bool {
        level >= self.level
    }

    pub fn event(&self, level: LogLevel, event: &str, fields: Value) {
        if !self.enabled(level) {
            return;
        }

        let line = event_record(now_millis(), level, event, fields).to_string();
        emit(level, &line);
    }

    pub fn debug(&self, event: &str, fields: Value) {
        self.event(LogLevel::Debug, event, fields);
    }

    pub fn info(&self, event: &str, fields: Value) {
        self.event(LogLevel::Info, event, fields);
    }

    pub fn warn(&self, event: &str, fields: Value) {
        self.event(LogLevel::Warn, event, fields);
    }
}

pub fn event_record(ts_ms: f64, level: LogLevel, event: &str, fields: Value) -> Value {
    let mut payload = Map::new();
    payload.insert(
        "ts".to_string(),
        Number::from_f64(ts_ms.floor())
            .map(Value::Number)
            .unwrap_or(Value::Null),
    );
    payload.insert("level".to_string(), Value::String(level.as_str().to_string()));
    payload.insert("event".to_string(), Value::String(event.to_string()));

    if let Value::Object(extra) = fields {
        for (key, value) in extra {
            payload.insert(key, value);
        }
    }

    Value::Object(payload)
}

#[cfg(target_arch = "wasm32")]
fn now_millis() -> f64 {
    js_sys::Date::now()
}

#[cfg(not(target_arch = "wasm32"))]
fn now_millis() -> f64 {
    use std::time::{SystemTime, UNIX_EPOCH};

    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|value| value.as_millis() as f64)
        .unwrap_or(0.0)
}

#[cfg(target_arch = "wasm32")]
fn emit(level: LogLevel, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        LogLevel::Debug => web_sys::console::debug_1(&line),
        LogLevel::Info => web_sys::console::info_1(&line),
        LogLevel::Warn => web_sys::console::warn_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: LogLevel, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn levels_order_from_debug_to_warn() {
        let logger = Logger::new(LogLevel::Info);

        assert!(!logger.enabled(LogLevel::Debug));
        assert!(logger.enabled(LogLevel::Info));
        assert!(logger.enabled(LogLevel::Warn));
    }

    #[test]
    fn parse_accepts_known_levels_case_insensitively() {
        assert_eq!(LogLevel::parse(" DEBUG "), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("warn"), Some(LogLevel::Warn));
        assert_eq!(LogLevel::parse("trace"), None);
    }

    #[test]
    fn record_merges_fields_after_standard_keys() {
        let record = event_record(
            1_700_000_000_123.7,
            LogLevel::Info,
            "feature_ready",
            json!({ "feature": "menu", "elements": 2 }),
        );

        assert_eq!(record["ts"], json!(1_700_000_000_123.0));
        assert_eq!(record["level"], "info");
        assert_eq!(record["event"], "feature_ready");
        assert_eq!(record["feature"], "menu");
        assert_eq!(record["elements"], 2);
    }

    #[test]
    fn record_ignores_non_object_fields() {
        let record = event_record(0.0, LogLevel::Debug, "effects_started", json!("loose"));

        assert_eq!(record.as_object().map(|object| object.len()), Some(3));
    }
}
