//! Diagnostic event log
//!
//! A capped ring buffer of raw session events with a run-length grouped
//! view for compact display.

mod buffer;
mod entry;
mod group;

pub use buffer::{default_denylist, EventLogBuffer, DEFAULT_CAPACITY};
pub use entry::{EventLogEntry, PREVIEW_CHARS};
pub use group::{EventGroup, Groups};
