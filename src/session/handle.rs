use chrono::Local;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use uuid::Uuid;

use super::config::SessionConfig;
use super::session::VoiceSession;
use super::stats::SessionStats;
use crate::event_log::{EventLogEntry, PREVIEW_CHARS};
use crate::events::{EventBus, SessionEvent, SubscriptionId};
use crate::transcript::{render_message, RenderedMessage};
use serde::Serialize;

/// Event group as handed to consumers outside the session lock
#[derive(Debug, Clone, Serialize)]
pub struct EventGroupSnapshot {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: String,
    pub summary: String,
    pub count: usize,
    pub expanded: bool,
    /// Previews of every entry when expanded, empty when collapsed
    pub entries: Vec<EntrySnapshot>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EntrySnapshot {
    pub id: Uuid,
    pub time: String,
    pub preview: String,
}

impl From<&EventLogEntry> for EntrySnapshot {
    fn from(entry: &EventLogEntry) -> Self {
        Self {
            id: entry.id,
            time: entry
                .timestamp
                .with_timezone(&Local)
                .format("%H:%M:%S%.3f")
                .to_string(),
            preview: entry.preview(PREVIEW_CHARS),
        }
    }
}

/// Shared access to a [`VoiceSession`]
///
/// Every fold happens under one lock, so events are reduced one at a time
/// in the order they are handed over.
#[derive(Clone)]
pub struct SessionHandle {
    inner: Arc<Mutex<VoiceSession>>,
}

impl SessionHandle {
    pub fn new(config: SessionConfig) -> Self {
        Self::from_session(VoiceSession::new(config))
    }

    pub fn from_session(session: VoiceSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    /// Lock the session; a panic in an earlier holder does not poison it
    pub fn lock(&self) -> MutexGuard<'_, VoiceSession> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn handle(&self, event: &SessionEvent) {
        self.lock().handle(event);
    }

    /// Feed every event published on `bus` into this session
    pub fn attach(&self, bus: &EventBus) -> SubscriptionId {
        let handle = self.clone();
        bus.subscribe(move |event| handle.handle(event))
    }

    pub fn transcript(&self) -> Vec<RenderedMessage> {
        self.lock().messages().iter().map(render_message).collect()
    }

    pub fn event_groups(&self) -> Vec<EventGroupSnapshot> {
        let session = self.lock();
        let groups: Vec<EventGroupSnapshot> = session
            .event_groups()
            .map(|group| EventGroupSnapshot {
                id: group.id,
                event_type: group.event_type.to_string(),
                summary: group.summary(),
                count: group.count,
                expanded: group.expanded,
                entries: if group.expanded {
                    group.entries.iter().map(|e| EntrySnapshot::from(*e)).collect()
                } else {
                    Vec::new()
                },
            })
            .collect();
        groups
    }

    pub fn toggle_group(&self, group_id: Uuid) -> Option<bool> {
        self.lock().toggle_group(group_id)
    }

    pub fn reset(&self) {
        self.lock().reset();
    }

    pub fn stats(&self) -> SessionStats {
        self.lock().stats()
    }
}

impl Default for SessionHandle {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}
