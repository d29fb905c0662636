//! Task events - facts about the Task aggregate
//!
//! Field names are the persisted payload keys; renaming one changes the
//! stored record shape.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::id::{TaskId, UserId};
use crate::model::priority::TaskPriority;
use crate::model::status::TaskStatus;
use crate::model::task::Task;
use crate::model::title::TaskTitle;
use crate::port::clock::Clock;

/// `task.created`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCreated {
    task_id: TaskId,
    title: TaskTitle,
    priority: TaskPriority,
    user_id: UserId,
    assigned_user_id: UserId,
    occurred_at: DateTime<Utc>,
}

impl TaskCreated {
    pub fn new(task: &Task, clock: &dyn Clock) -> Self {
        Self {
            task_id: task.id(),
            title: task.title().clone(),
            priority: task.priority(),
            user_id: task.creator(),
            assigned_user_id: task.assignee(),
            occurred_at: clock.now(),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn creator_id(&self) -> UserId {
        self.user_id
    }

    pub fn assignee_id(&self) -> UserId {
        self.assigned_user_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// `task.status_changed`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStatusChanged {
    task_id: TaskId,
    old_status: TaskStatus,
    new_status: TaskStatus,
    changed_by_user_id: UserId,
    occurred_at: DateTime<Utc>,
}

impl TaskStatusChanged {
    pub fn new(
        task_id: TaskId,
        old_status: TaskStatus,
        new_status: TaskStatus,
        changed_by: UserId,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            task_id,
            old_status,
            new_status,
            changed_by_user_id: changed_by,
            occurred_at: clock.now(),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn old_status(&self) -> TaskStatus {
        self.old_status
    }

    pub fn new_status(&self) -> TaskStatus {
        self.new_status
    }

    pub fn changed_by(&self) -> UserId {
        self.changed_by_user_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// `task.completed`
///
/// `completed_at` is the aggregate's completion stamp; `occurred_at` is when
/// the event itself was recorded.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskCompleted {
    task_id: TaskId,
    completed_by_user_id: UserId,
    completed_at: DateTime<Utc>,
    occurred_at: DateTime<Utc>,
}

impl TaskCompleted {
    pub fn new(
        task_id: TaskId,
        completed_by: UserId,
        completed_at: DateTime<Utc>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            task_id,
            completed_by_user_id: completed_by,
            completed_at,
            occurred_at: clock.now(),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn completed_by(&self) -> UserId {
        self.completed_by_user_id
    }

    pub fn completed_at(&self) -> DateTime<Utc> {
        self.completed_at
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// `task.assigned`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskAssigned {
    task_id: TaskId,
    previous_assigned_user_id: UserId,
    assigned_user_id: UserId,
    assigned_by_user_id: UserId,
    occurred_at: DateTime<Utc>,
}

impl TaskAssigned {
    pub fn new(
        task_id: TaskId,
        previous_assignee: UserId,
        assignee: UserId,
        assigned_by: UserId,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            task_id,
            previous_assigned_user_id: previous_assignee,
            assigned_user_id: assignee,
            assigned_by_user_id: assigned_by,
            occurred_at: clock.now(),
        }
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn previous_assignee_id(&self) -> UserId {
        self.previous_assigned_user_id
    }

    pub fn assignee_id(&self) -> UserId {
        self.assigned_user_id
    }

    pub fn assigned_by(&self) -> UserId {
        self.assigned_by_user_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
