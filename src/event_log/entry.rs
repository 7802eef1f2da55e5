use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

/// Default number of characters shown for a payload preview
pub const PREVIEW_CHARS: usize = 100;

/// A raw event as recorded in the log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: String,
    pub data: Value,
    pub timestamp: DateTime<Utc>,
}

impl EventLogEntry {
    pub fn new(event_type: impl Into<String>, data: Value) -> Self {
        Self {
            id: Uuid::new_v4(),
            event_type: event_type.into(),
            data,
            timestamp: Utc::now(),
        }
    }

    /// Compact JSON of the payload, cut to `max_chars` characters
    pub fn preview(&self, max_chars: usize) -> String {
        if self.data.is_null() {
            return "{}".to_string();
        }

        let json = self.data.to_string();
        match json.char_indices().nth(max_chars) {
            Some((cut, _)) => format!("{}...", &json[..cut]),
            None => json,
        }
    }
}
