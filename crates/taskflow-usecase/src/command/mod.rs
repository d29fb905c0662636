//! Commands and their handlers
//!
//! A command is an immutable intent built from raw caller input. Its handler
//! turns the raw input into value objects, applies it to the aggregate and
//! commits the result. One successful command means exactly one aggregate
//! write and one event; a failed command means neither.

mod assign_task;
mod change_task_status;
mod complete_task;
mod create_task;


pub use assign_task::{AssignTask, AssignTaskHandler};
pub use change_task_status::{ChangeTaskStatus, ChangeTaskStatusHandler};
pub use complete_task::{CompleteTask, CompleteTaskHandler};
pub use create_task::{CreateTask, CreateTaskHandler};

use std::sync::Arc;

use tracing::debug;

use taskflow_domain::{
    Clock, DomainEvent, Task, TaskId, TaskRepository, UnitOfWork, User, UserId, UserRepository,
};

use crate::bus::EventBus;
use crate::error::CommandError;

/// One handler per intent
pub trait CommandHandler {
    type Command;
    type Output;

    fn handle(&self, command: Self::Command) -> Result<Self::Output, CommandError>;
}

/// Collaborators every command handler is built with
///
/// Wired once at startup and cloned into each handler.
#[derive(Clone)]
pub struct CommandDeps {
    pub tasks: Arc<dyn TaskRepository>,
    pub users: Arc<dyn UserRepository>,
    pub unit_of_work: Arc<dyn UnitOfWork>,
    pub clock: Arc<dyn Clock>,
    pub bus: Arc<EventBus>,
}

impl CommandDeps {
    pub(crate) fn load_task(&self, id: TaskId) -> Result<Task, CommandError> {
        self.tasks
            .find(id)?
            .ok_or_else(|| CommandError::not_found("task", id.as_int()))
    }

    pub(crate) fn require_user(&self, id: UserId) -> Result<User, CommandError> {
        self.users
            .find(id)?
            .ok_or_else(|| CommandError::not_found("user", id.as_int()))
    }

    /// Commit the aggregate and its event atomically, then dispatch
    ///
    /// Dispatch runs only after a successful commit and cannot fail the
    /// command.
    pub(crate) fn commit_and_dispatch(
        &self,
        task: &Task,
        event: DomainEvent,
    ) -> Result<DomainEvent, CommandError> {
        self.unit_of_work.commit(task, &event)?;

        let report = self.bus.dispatch(&event);
        debug!(
            event = event.name(),
            task_id = %task.id(),
            attempted = report.attempted,
            failed = report.failures.len(),
            "Event dispatched"
        );

        Ok(event)
    }
}
