//! Unit of Work - the atomicity boundary of a command
//!
//! A successful command persists its aggregate change and appends its event
//! together. Either both land or neither does. Dispatching the event to
//! handlers happens afterwards and is not part of this unit.

use thiserror::Error;

use super::event_store::EventStoreError;
use super::task_repository::RepositoryError;
use crate::event::DomainEvent;
use crate::model::task::Task;

#[derive(Debug, Error)]
pub enum CommitError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error(transparent)]
    EventStore(#[from] EventStoreError),
}

pub trait UnitOfWork: Send + Sync {
    /// Save `task` (version-checked like `TaskRepository::save`) and append
    /// `event` as one atomic step
    fn commit(&self, task: &Task, event: &DomainEvent) -> Result<(), CommitError>;
}
