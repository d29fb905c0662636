//! AuditLogger - bounded trail of committed domain events

use std::collections::{BTreeMap, VecDeque};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use shared::AuditConfig;
use taskflow_domain::{DomainEvent, EntityRef};

/// Audit log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditEntry {
    pub timestamp: DateTime<Utc>,
    pub event_name: String,
    pub actor_id: i64,
    /// `kind#id`, e.g. `task#7`
    pub subject: String,
    pub metadata: Map<String, Value>,
}

impl AuditEntry {
    pub fn from_event(event: &DomainEvent) -> serde_json::Result<Self> {
        Ok(Self {
            timestamp: event.occurred_at(),
            event_name: event.name().to_string(),
            actor_id: event.actor().as_int(),
            subject: event.subject().to_string(),
            metadata: event.payload()?,
        })
    }
}

/// Audit logger
///
/// Holds at most `max_entries`; the oldest entry is dropped first.
#[derive(Debug)]
pub struct AuditLogger {
    entries: VecDeque<AuditEntry>,
    max_entries: usize,
}

impl AuditLogger {
    pub fn new(max_entries: usize) -> Self {
        let max_entries = max_entries.max(1);
        Self {
            entries: VecDeque::with_capacity(max_entries.min(1024)),
            max_entries,
        }
    }

    pub fn from_config(config: &AuditConfig) -> Self {
        Self::new(config.max_entries)
    }

    pub fn log(&mut self, entry: AuditEntry) {
        if self.entries.len() >= self.max_entries {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Record a domain event
    pub fn record(&mut self, event: &DomainEvent) -> serde_json::Result<()> {
        self.log(AuditEntry::from_event(event)?);
        Ok(())
    }

    /// Newest first
    pub fn get_recent(&self, limit: usize) -> Vec<&AuditEntry> {
        self.entries.iter().rev().take(limit).collect()
    }

    /// Everything recorded about one entity, oldest first
    pub fn entries_for(&self, subject: EntityRef) -> Vec<&AuditEntry> {
        let subject = subject.to_string();
        self.entries
            .iter()
            .filter(|e| e.subject == subject)
            .collect()
    }

    pub fn get_stats(&self) -> AuditStats {
        let mut by_event = BTreeMap::new();
        for entry in &self.entries {
            *by_event.entry(entry.event_name.clone()).or_insert(0) += 1;
        }

        AuditStats {
            total_entries: self.entries.len(),
            by_event,
        }
    }

    /// Export as a JSON array, oldest first
    pub fn export_json(&self) -> serde_json::Result<Value> {
        serde_json::to_value(&self.entries)
    }
}

/// Audit statistics
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditStats {
    pub total_entries: usize,
    pub by_event: BTreeMap<String, usize>,
}

impl Default for AuditLogger {
    fn default() -> Self {
        Self::from_config(&AuditConfig::default())
    }
}
