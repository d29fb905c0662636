//! Task Repository - Abstract persistence for the Task aggregate

use thiserror::Error;

use crate::model::id::TaskId;
use crate::model::task::Task;

/// Errors that can occur during repository operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RepositoryError {
    /// Failed to persist or read
    #[error("Persistence error: {message}")]
    PersistenceError { message: String },

    /// The stored version moved on since the aggregate was loaded
    #[error("Concurrent modification for task {id}: expected version {expected}, found {actual}")]
    ConcurrencyError {
        id: TaskId,
        expected: u64,
        actual: u64,
    },
}

/// Task Repository Trait
///
/// `save` is version-checked: the aggregate's `version()` must equal the
/// stored version (0 when absent), otherwise `ConcurrencyError`. On success
/// the stored copy carries `version() + 1`.
pub trait TaskRepository: Send + Sync {
    /// Allocate the identity for a task about to be created
    fn next_id(&self) -> Result<TaskId, RepositoryError>;

    fn find(&self, id: TaskId) -> Result<Option<Task>, RepositoryError>;

    fn save(&self, task: &Task) -> Result<(), RepositoryError>;

    /// Check if a task exists
    fn exists(&self, id: TaskId) -> Result<bool, RepositoryError> {
        Ok(self.find(id)?.is_some())
    }
}
