//! CompleteTask - move a task to `completed`

use tracing::{debug, info};

use taskflow_domain::{DomainEvent, TaskCompleted, TaskId, UserId};

use super::{CommandDeps, CommandHandler};
use crate::error::CommandError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompleteTask {
    task_id: i64,
    actor_id: i64,
}

impl CompleteTask {
    pub fn new(task_id: i64, actor_id: i64) -> Self {
        Self { task_id, actor_id }
    }

    pub fn task_id(&self) -> i64 {
        self.task_id
    }

    pub fn actor_id(&self) -> i64 {
        self.actor_id
    }
}

pub struct CompleteTaskHandler {
    deps: CommandDeps,
}

impl CompleteTaskHandler {
    pub fn new(deps: CommandDeps) -> Self {
        Self { deps }
    }
}

impl CommandHandler for CompleteTaskHandler {
    type Command = CompleteTask;
    type Output = TaskCompleted;

    fn handle(&self, command: CompleteTask) -> Result<TaskCompleted, CommandError> {
        debug!(
            task_id = command.task_id(),
            actor_id = command.actor_id(),
            "Handling CompleteTask"
        );

        let task_id = TaskId::from_int(command.task_id())?;
        let actor = UserId::from_int(command.actor_id())?;

        let mut task = self.deps.load_task(task_id)?;

        let now = self.deps.clock.now();
        task.complete(now)?;

        let completed = TaskCompleted::new(task_id, actor, now, self.deps.clock.as_ref());
        self.deps
            .commit_and_dispatch(&task, DomainEvent::from(completed.clone()))?;

        info!(task_id = %task_id, actor_id = %actor, "Task completed");
        Ok(completed)
    }
}
