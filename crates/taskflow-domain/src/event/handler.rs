//! Event handler port
//!
//! A handler is an independent reaction to one or more event kinds. It runs
//! after the event is durably stored, so its failure never undoes the
//! command that produced the event.

use thiserror::Error;

use super::DomainEvent;
use crate::port::notifier::NotifyError;
use crate::repository::task_repository::RepositoryError;

pub trait EventHandler: Send + Sync {
    /// Short identifier used in logs and dispatch reports
    fn name(&self) -> &str;

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError>;
}

/// A reaction failed (non-fatal)
#[derive(Debug, Error)]
pub enum HandlerError {
    #[error(transparent)]
    Notify(#[from] NotifyError),

    #[error("Lookup failed: {0}")]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Other(String),
}
