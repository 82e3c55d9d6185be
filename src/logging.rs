//! Structured diagnostics for export runs.
//!
//! The exporter reports what it does as named events with key/value
//! fields through an injected [`ExportLogger`]. [`TracingLogger`] forwards
//! them to `tracing`; [`RecordingLogger`] keeps them for inspection.

use std::sync::Mutex;

use tracing::Level;

/// A sink for structured export events.
pub trait ExportLogger: Send + Sync {
    /// Records one event.
    fn log(&self, level: Level, event: &'static str, fields: &[(&'static str, String)]);
}

/// Forwards events to the `tracing` macros.
///
/// The event name is emitted as the `event` field and as the message.
/// `tracing` needs field names at compile time, so the per-event pairs are
/// rendered into one `fields` value as `key=value`, with values that
/// contain whitespace or quotes quoted.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl ExportLogger for TracingLogger {
    fn log(&self, level: Level, event: &'static str, fields: &[(&'static str, String)]) {
        let fields = render_fields(fields);
        if level == Level::ERROR {
            tracing::error!(event, fields = %fields, "{}", event);
        } else if level == Level::WARN {
            tracing::warn!(event, fields = %fields, "{}", event);
        } else if level == Level::INFO {
            tracing::info!(event, fields = %fields, "{}", event);
        } else if level == Level::DEBUG {
            tracing::debug!(event, fields = %fields, "{}", event);
        } else {
            tracing::trace!(event, fields = %fields, "{}", event);
        }
    }
}

fn render_fields(fields: &[(&'static str, String)]) -> String {
    fields
        .iter()
        .map(|(key, value)| {
            if value.is_empty() || value.contains(|c: char| c.is_whitespace() || c == '"') {
                format!("{}={:?}", key, value)
            } else {
                format!("{}={}", key, value)
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One recorded event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggedEvent {
    /// Severity.
    pub level: Level,
    /// Event name.
    pub event: &'static str,
    /// Key/value fields in emission order.
    pub fields: Vec<(&'static str, String)>,
}

impl LoggedEvent {
    /// Returns a field's value.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingLogger {
    events: Mutex<Vec<LoggedEvent>>,
}

impl RecordingLogger {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a copy of every recorded event.
    pub fn events(&self) -> Vec<LoggedEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    /// Returns the recorded events with the given name.
    pub fn events_named(&self, event: &str) -> Vec<LoggedEvent> {
        self.events()
            .into_iter()
            .filter(|e| e.event == event)
            .collect()
    }
}

impl ExportLogger for RecordingLogger {
    fn log(&self, level: Level, event: &'static str, fields: &[(&'static str, String)]) {
        if let Ok(mut events) = self.events.lock() {
            events.push(LoggedEvent {
                level,
                event,
                fields: fields.to_vec(),
            });
        }
    }
}
