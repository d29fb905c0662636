//! Event Store - append-only log of domain events

use thiserror::Error;

use crate::event::record::{EventQuery, StoredEvent};
use crate::event::DomainEvent;

#[derive(Debug, Error)]
pub enum EventStoreError {
    #[error("Failed to serialize event: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Event store I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Event store unavailable: {0}")]
    Unavailable(String),
}

pub trait EventStore: Send + Sync {
    /// Durably append one event. Returns only after the write is committed.
    fn append(&self, event: &DomainEvent) -> Result<(), EventStoreError>;

    /// Read side: records matching `query`, newest first
    fn query(&self, query: &EventQuery) -> Result<Vec<StoredEvent>, EventStoreError>;
}
