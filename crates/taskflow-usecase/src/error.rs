//! Command failure taxonomy
//!
//! Every variant is fatal to the command and is raised before anything is
//! committed. Handler failures after dispatch are not represented here;
//! see `bus::HandlerFailure`.

use thiserror::Error;

use taskflow_domain::{CommitError, InvalidValueObject, RepositoryError, TaskError, TaskId};

#[derive(Debug, Error)]
pub enum CommandError {
    /// Malformed input (empty title, unknown literal, non-positive id)
    #[error(transparent)]
    Validation(#[from] InvalidValueObject),

    /// Referenced task or actor does not exist
    #[error("{entity} {id} not found")]
    NotFound { entity: &'static str, id: i64 },

    /// The aggregate refused the change in its current state
    #[error(transparent)]
    InvalidTransition(#[from] TaskError),

    /// Someone else saved the task between our load and our commit
    #[error("Conflict on task {id}: expected version {expected}, found {actual}")]
    Conflict { id: TaskId, expected: u64, actual: u64 },

    /// The aggregate save or the event append could not be committed
    #[error("Persistence failed: {0}")]
    Persistence(String),
}

impl From<RepositoryError> for CommandError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::ConcurrencyError {
                id,
                expected,
                actual,
            } => CommandError::Conflict {
                id,
                expected,
                actual,
            },
            RepositoryError::PersistenceError { message } => CommandError::Persistence(message),
        }
    }
}

impl From<CommitError> for CommandError {
    fn from(err: CommitError) -> Self {
        match err {
            CommitError::Repository(e) => e.into(),
            CommitError::EventStore(e) => CommandError::Persistence(e.to_string()),
        }
    }
}

impl CommandError {
    pub(crate) fn not_found(entity: &'static str, id: i64) -> Self {
        CommandError::NotFound { entity, id }
    }
}
