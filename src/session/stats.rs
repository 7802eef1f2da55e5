use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::connection::ConnectionStatus;
use crate::events::TransportState;

/// Snapshot of the session for status displays
#[derive(Debug, Clone, Serialize)]
pub struct SessionStats {
    /// Current session identifier
    pub session_id: String,

    /// Session sequence number, 0 before the first connection attempt
    pub attempt: u32,

    /// When the current session started
    pub started_at: DateTime<Utc>,

    pub transport_state: TransportState,

    pub status: ConnectionStatus,

    /// Display label for `status`
    pub status_label: &'static str,

    /// Explicit or inferred failure, if any
    pub failure: Option<String>,

    /// Number of transcript messages
    pub message_count: usize,

    /// Number of entries in the event log
    pub event_count: usize,

    /// Number of groups in the event log view
    pub event_group_count: usize,

    pub user_speaking: bool,
    pub bot_speaking: bool,

    /// Speaking indicator text
    pub activity_label: &'static str,

    /// Seconds since the transport became ready (0 when not connected)
    pub connected_secs: u64,
}

impl SessionStats {
    /// Connected time as `MM:SS`
    pub fn connected_clock(&self) -> String {
        format_elapsed(self.connected_secs)
    }
}

/// Format seconds as zero-padded `MM:SS`
pub fn format_elapsed(seconds: u64) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
