//! JSON Event Sink
//!
//! Outputs bundle events as NDJSON for CI/automation consumption.

use crate::domain::ports::{BundleEvent, BundleEventSink};
use std::io::{self, Write};
use std::sync::Mutex;

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    command: &'static str,
    /// Mutex to ensure thread-safe writes
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    /// Create a new JSON event sink writing to stdout
    pub fn stdout(command: &'static str) -> Self {
        Self::with_writer(command, io::stdout())
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(command: &'static str, writer: W) -> Self {
        Self {
            command,
            writer: Mutex::new(Box::new(writer)),
        }
    }

    /// Serialize an event, adding command, severity, message and timestamp
    pub fn to_value(&self, event: &BundleEvent) -> serde_json::Value {
        let mut value =
            serde_json::to_value(event).unwrap_or_else(|_| serde_json::json!({"event": "error"}));
        if let Some(obj) = value.as_object_mut() {
            obj.insert("command".to_string(), serde_json::json!(self.command));
            obj.insert("severity".to_string(), serde_json::json!(event.severity()));
            obj.insert("message".to_string(), serde_json::json!(event.message()));
            obj.insert(
                "timestamp".to_string(),
                serde_json::json!(chrono::Local::now().to_rfc3339()),
            );
        }
        value
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

impl BundleEventSink for JsonEventSink {
    fn on_event(&self, event: BundleEvent) {
        let value = self.to_value(&event);
        self.write_event(value);
    }
}
