use chrono::{DateTime, Local, TimeZone, Utc};
use serde::Serialize;
use std::collections::{vec_deque, HashSet};
use std::fmt;
use std::iter::Peekable;
use uuid::Uuid;

use super::entry::EventLogEntry;
use crate::transcript::format_clock;

/// A maximal run of consecutive entries sharing the same type
///
/// Groups are derived on every read and borrow from the buffer; `id` is the
/// first entry's id, which stays stable while that entry is retained.
#[derive(Debug, Clone, Serialize)]
pub struct EventGroup<'a> {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub event_type: &'a str,
    pub first_timestamp: DateTime<Utc>,
    pub last_timestamp: DateTime<Utc>,
    pub count: usize,
    pub expanded: bool,
    pub entries: Vec<&'a EventLogEntry>,
}

impl<'a> EventGroup<'a> {
    /// Collapsed one-line form: type, count and local time range
    pub fn summary(&self) -> String {
        self.summary_in(&Local)
    }

    pub fn summary_in<Tz: TimeZone>(&self, zone: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        let first = format_clock(&self.first_timestamp.with_timezone(zone));
        if self.count == 1 {
            format!("{} [{}]", self.event_type, first)
        } else {
            format!(
                "{} ×{} [{} – {}]",
                self.event_type,
                self.count,
                first,
                format_clock(&self.last_timestamp.with_timezone(zone))
            )
        }
    }
}

/// Lazy run-length grouping over the buffer, one pass
pub struct Groups<'a> {
    entries: Peekable<vec_deque::Iter<'a, EventLogEntry>>,
    expanded: &'a HashSet<Uuid>,
}

impl<'a> Groups<'a> {
    pub(crate) fn new(
        entries: vec_deque::Iter<'a, EventLogEntry>,
        expanded: &'a HashSet<Uuid>,
    ) -> Self {
        Self {
            entries: entries.peekable(),
            expanded,
        }
    }
}

impl<'a> Iterator for Groups<'a> {
    type Item = EventGroup<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let first = self.entries.next()?;
        let mut run = vec![first];

        while let Some(entry) = self
            .entries
            .next_if(|next| next.event_type == first.event_type)
        {
            run.push(entry);
        }

        let last = run[run.len() - 1];
        Some(EventGroup {
            id: first.id,
            event_type: &first.event_type,
            first_timestamp: first.timestamp,
            last_timestamp: last.timestamp,
            count: run.len(),
            expanded: self.expanded.contains(&first.id),
            entries: run,
        })
    }
}
