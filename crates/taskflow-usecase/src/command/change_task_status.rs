//! ChangeTaskStatus - move a task along the status state machine

use tracing::{debug, info};

use taskflow_domain::{DomainEvent, TaskId, TaskStatus, TaskStatusChanged, UserId};

use super::{CommandDeps, CommandHandler};
use crate::error::CommandError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTaskStatus {
    task_id: i64,
    new_status: String,
    actor_id: i64,
}

impl ChangeTaskStatus {
    pub fn new(task_id: i64, new_status: impl Into<String>, actor_id: i64) -> Self {
        Self {
            task_id,
            new_status: new_status.into(),
            actor_id,
        }
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn new_status(&self) -> &str {
        &self.new_status
    }

    pub fn actor_id(&self) -> i64 {
        self.actor_id
    }
}

pub struct ChangeTaskStatusHandler {
    deps: CommandDeps,
}

impl ChangeTaskStatusHandler {
    pub fn new(deps: CommandDeps) -> Self {
        Self { deps }
    }
}

impl CommandHandler for ChangeTaskStatusHandler {
    type Command = ChangeTaskStatus;
    type Output = TaskStatusChanged;

    fn handle(&self, command: ChangeTaskStatus) -> Result<TaskStatusChanged, CommandError> {
        debug!(
            task_id = command.task_id(),
            new_status = command.new_status(),
            "Handling ChangeTaskStatus"
        );

        let task_id = TaskId::from_int(command.task_id())?;
        let new_status: TaskStatus = command.new_status().parse()?;
        let actor = UserId::from_int(command.actor_id())?;

        let mut task = self.deps.load_task(task_id)?;

        // Self-transitions are rejected here, before anything is written
        let old_status = task.change_status(new_status, self.deps.clock.now())?;

        let changed = TaskStatusChanged::new(
            task_id,
            old_status,
            new_status,
            actor,
            self.deps.clock.as_ref(),
        );
        self.deps
            .commit_and_dispatch(&task, DomainEvent::from(changed.clone()))?;

        info!(
            task_id = %task_id,
            from = %old_status,
            to = %new_status,
            "Task status changed"
        );
        Ok(changed)
    }
}
