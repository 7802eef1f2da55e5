use serde_json::Value;
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};
use uuid::Uuid;

use super::entry::EventLogEntry;
use super::group::Groups;
use crate::events::names;

/// Default number of entries retained
pub const DEFAULT_CAPACITY: usize = 100;

/// Event types that are never recorded by default (audio level telemetry)
pub fn default_denylist() -> Vec<String> {
    vec![
        names::LOCAL_AUDIO_LEVEL.to_string(),
        names::REMOTE_AUDIO_LEVEL.to_string(),
    ]
}

/// Bounded log of the most recent raw events
///
/// Oldest entries are evicted silently once `capacity` is reached; the log
/// is a diagnostic view, not a complete record.
#[derive(Debug, Clone)]
pub struct EventLogBuffer {
    entries: VecDeque<EventLogEntry>,
    capacity: usize,
    denylist: HashSet<String>,
    expanded: HashSet<Uuid>,
    evicted: u64,
}

impl EventLogBuffer {
    pub fn new(capacity: usize, denylist: impl IntoIterator<Item = String>) -> Self {
        let capacity = capacity.max(1);
        let denylist: HashSet<String> = denylist.into_iter().collect();

        info!(
            "Event log initialized: {} entries, {} denylisted types",
            capacity,
            denylist.len()
        );

        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            denylist,
            expanded: HashSet::new(),
            evicted: 0,
        }
    }

    /// Append an event; returns its entry id, or `None` if the type is denylisted
    pub fn record(&mut self, event_type: &str, data: Value) -> Option<Uuid> {
        if self.denylist.contains(event_type) {
            return None;
        }

        while self.entries.len() >= self.capacity {
            if let Some(oldest) = self.entries.pop_front() {
                self.expanded.remove(&oldest.id);
                self.evicted += 1;
            }
        }

        let entry = EventLogEntry::new(event_type, data);
        let id = entry.id;
        self.entries.push_back(entry);

        Some(id)
    }

    /// Run-length grouped view, computed lazily in one pass
    pub fn view(&self) -> Groups<'_> {
        Groups::new(self.entries.iter(), &self.expanded)
    }

    /// Flip a group between collapsed and expanded
    ///
    /// Returns the new state, or `None` when no group starts at `group_id`.
    pub fn toggle(&mut self, group_id: Uuid) -> Option<bool> {
        if !self.view().any(|group| group.id == group_id) {
            debug!("No event group {}", group_id);
            return None;
        }

        if self.expanded.remove(&group_id) {
            Some(false)
        } else {
            self.expanded.insert(group_id);
            Some(true)
        }
    }

    pub fn reset(&mut self) {
        self.entries.clear();
        self.expanded.clear();
        self.evicted = 0;
    }

    pub fn entries(&self) -> impl Iterator<Item = &EventLogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entries dropped to stay within capacity since the last reset
    pub fn evicted(&self) -> u64 {
        self.evicted
    }

    pub fn is_denied(&self, event_type: &str) -> bool {
        self.denylist.contains(event_type)
    }
}

impl Default for EventLogBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, default_denylist())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record_types(buffer: &mut EventLogBuffer, types: &[&str]) {
        for event_type in types {
            buffer.record(event_type, Value::Null);
        }
    }

    #[test]
    fn test_run_length_grouping() {
        let mut buffer = EventLogBuffer::default();
        record_types(&mut buffer, &["A", "A", "A", "B", "A", "A"]);

        let groups: Vec<(&str, usize)> = buffer.view().map(|g| (g.event_type, g.count)).collect();
        assert_eq!(groups, vec![("A", 3), ("B", 1), ("A", 2)]);
    }

    #[test]
    fn test_group_timestamps_span_the_run() {
        let mut buffer = EventLogBuffer::default();
        record_types(&mut buffer, &["A", "A"]);

        let group = buffer.view().next().unwrap();
        assert!(group.first_timestamp <= group.last_timestamp);
        assert_eq!(group.entries.len(), 2);
        assert_eq!(group.id, group.entries[0].id);
    }

    #[test]
    fn test_capacity_evicts_oldest() {
        let mut buffer = EventLogBuffer::new(5, Vec::new());
        for i in 0..8 {
            buffer.record(&format!("event-{}", i), Value::Null);
        }

        assert_eq!(buffer.len(), 5);
        assert_eq!(buffer.evicted(), 3);
        let types: Vec<&str> = buffer.entries().map(|e| e.event_type.as_str()).collect();
        assert_eq!(types, vec!["event-3", "event-4", "event-5", "event-6", "event-7"]);
    }

    #[test]
    fn test_denylisted_types_take_no_capacity() {
        let mut buffer = EventLogBuffer::new(2, default_denylist());
        buffer.record("botReady", Value::Null);
        for _ in 0..10 {
            assert!(buffer.record("localAudioLevel", Value::from(0.4)).is_none());
        }

        assert_eq!(buffer.len(), 1);
        assert!(buffer.is_denied("remoteAudioLevel"));
    }

    #[test]
    fn test_toggle_group() {
        let mut buffer = EventLogBuffer::default();
        record_types(&mut buffer, &["A", "A", "B"]);
        let head = buffer.view().next().unwrap().id;
        let inner = buffer.entries().nth(1).unwrap().id;

        assert_eq!(buffer.toggle(head), Some(true));
        assert!(buffer.view().next().unwrap().expanded);
        assert_eq!(buffer.toggle(head), Some(false));

        // Only group heads are addressable
        assert_eq!(buffer.toggle(inner), None);
        assert_eq!(buffer.toggle(Uuid::new_v4()), None);
    }

    #[test]
    fn test_expand_state_survives_new_entries() {
        let mut buffer = EventLogBuffer::default();
        record_types(&mut buffer, &["A", "B"]);
        let head = buffer.view().next().unwrap().id;
        buffer.toggle(head);

        record_types(&mut buffer, &["B", "C"]);
        let first = buffer.view().next().unwrap();
        assert_eq!(first.id, head);
        assert!(first.expanded);
    }

    #[test]
    fn test_reset_clears_entries_and_expand_state() {
        let mut buffer = EventLogBuffer::default();
        record_types(&mut buffer, &["A"]);
        let head = buffer.view().next().unwrap().id;
        buffer.toggle(head);

        buffer.reset();
        assert!(buffer.is_empty());
        assert_eq!(buffer.view().count(), 0);
        assert_eq!(buffer.toggle(head), None);
    }
}
