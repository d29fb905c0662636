//! AssignTask - hand a task to another user

use tracing::{debug, info};

use taskflow_domain::{DomainEvent, TaskAssigned, TaskId, UserId};

use super::{CommandDeps, CommandHandler};
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssignTask {
    task_id: i64,
    assignee_id: i64,
    actor_id: i64,
}

impl AssignTask {
    pub fn new(task_id: i64, assignee_id: i64, actor_id: i64) -> Self {
        Self {
            task_id,
            assignee_id,
            actor_id,
        }
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn assignee_id(&self) -> i64 {
        self.assignee_id
    }

    pub fn actor_id(&self) -> i64 {
        self.actor_id
    }
}

pub struct AssignTaskHandler {
    deps: CommandDeps,
}

impl AssignTaskHandler {
    pub fn new(deps: CommandDeps) -> Self {
        Self { deps }
    }
}

impl CommandHandler for AssignTaskHandler {
    type Command = AssignTask;
    type Output = TaskAssigned;

    fn handle(&self, command: AssignTask) -> Result<TaskAssigned, CommandError> {
        debug!(
            task_id = command.task_id(),
            assignee_id = command.assignee_id(),
            "Handling AssignTask"
        );

        let task_id = TaskId::from_int(command.task_id())?;
        let assignee = UserId::from_int(command.assignee_id())?;
        let actor = UserId::from_int(command.actor_id())?;

        let mut task = self.deps.load_task(task_id)?;
        self.deps.require_user(assignee)?;

        let previous = task.assign(assignee)?;

        let assigned = TaskAssigned::new(
            task_id,
            previous,
            assignee,
            actor,
            self.deps.clock.as_ref(),
        );
        self.deps
            .commit_and_dispatch(&task, DomainEvent::from(assigned.clone()))?;

        info!(
            task_id = %task_id,
            from = %previous,
            to = %assignee,
            "Task reassigned"
        );
        Ok(assigned)
    }
}
