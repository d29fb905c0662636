//! Stored events and read-side queries
//!
//! `StoredEvent` is the persisted shape every event store implementation
//! writes:
//!
//! ```json
//! { "event_name": "task.created", "event_data": { ... }, "occurred_at": "2024-05-01T12:00:00Z" }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredEvent {
    pub event_name: String,
    pub event_data: Map<String, Value>,
    pub occurred_at: DateTime<Utc>,
}

/// Read-side filter for audit consumers
///
/// Results are newest first. Records with equal timestamps come back in
/// reverse append order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventQuery {
    pub event_name: Option<String>,
    pub since: Option<DateTime<Utc>>,
    pub limit: Option<usize>,
}

impl EventQuery {
    /// Match everything
    pub fn all() -> Self {
        Self::default()
    }

    pub fn named(mut self, event_name: impl Into<String>) -> Self {
        self.event_name = Some(event_name.into());
        self
    }

    /// Only records with `occurred_at >= since`
    pub fn since(mut self, since: DateTime<Utc>) -> Self {
        self.since = Some(since);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn matches(&self, record: &StoredEvent) -> bool {
        let name_ok = self
            .event_name
            .as_deref()
            .map_or(true, |name| record.event_name == name);
        let since_ok = self.since.map_or(true, |since| record.occurred_at >= since);
        name_ok && since_ok
    }

    /// Apply the filter to records given in append order
    pub fn select<'a, I>(&self, records: I) -> Vec<StoredEvent>
    where
        I: IntoIterator<Item = &'a StoredEvent>,
        I::IntoIter: DoubleEndedIterator,
    {
        let mut selected: Vec<StoredEvent> = records
            .into_iter()
            .rev()
            .filter(|record| self.matches(record))
            .cloned()
            .collect();

        // Stable sort keeps reverse append order among equal timestamps
        selected.sort_by(|a, b| b.occurred_at.cmp(&a.occurred_at));

        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}
