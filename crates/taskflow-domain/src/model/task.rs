//! Task - the aggregate this core protects
//!
//! A Task is an Entity: it keeps its `TaskId` through every change of
//! title, assignee or status. The aggregate itself is persisted by an outer
//! layer; command handlers load it, mutate it for the span of one command,
//! and hand it back.

use chrono::{DateTime, Utc};
use thiserror::Error;

use super::id::{CategoryId, TagId, TaskId, UserId};
use super::priority::TaskPriority;
use super::status::TaskStatus;
use super::title::TaskTitle;

/// Everything needed to create a task, already validated
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: TaskTitle,
    pub description: Option<String>,
    pub priority: TaskPriority,
    pub creator: UserId,
    pub assignee: UserId,
    pub category: Option<CategoryId>,
    pub due_date: Option<DateTime<Utc>>,
    pub tags: Vec<TagId>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    id: TaskId,
    title: TaskTitle,
    description: Option<String>,
    priority: TaskPriority,
    status: TaskStatus,
    creator: UserId,
    assignee: UserId,
    category: Option<CategoryId>,
    due_date: Option<DateTime<Utc>>,
    tags: Vec<TagId>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
    /// Number of successful saves; 0 means never persisted
    version: u64,
}

impl Task {
    /// Create a new task. Status always starts at `pending`.
    pub fn create(id: TaskId, new: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            priority: new.priority,
            status: TaskStatus::Pending,
            creator: new.creator,
            assignee: new.assignee,
            category: new.category,
            due_date: new.due_date,
            tags: new.tags,
            created_at: now,
            completed_at: None,
            version: 0,
        }
    }

    // ========== Getters ==========

    pub fn id(&self) -> TaskId {
        self.id
    }

    pub fn title(&self) -> &TaskTitle {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> TaskPriority {
        self.priority
    }

    pub fn status(&self) -> TaskStatus {
        self.status
    }

    pub fn creator(&self) -> UserId {
        self.creator
    }

    pub fn assignee(&self) -> UserId {
        self.assignee
    }

    pub fn category(&self) -> Option<CategoryId> {
        self.category
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn tags(&self) -> &[TagId] {
        &self.tags
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    // ========== State Transitions ==========

    /// Move to `next`, returning the status the task had before
    ///
    /// Entering `completed` stamps `completed_at`; leaving it clears the stamp.
    pub fn change_status(
        &mut self,
        next: TaskStatus,
        now: DateTime<Utc>,
    ) -> Result<TaskStatus, TaskError> {
        if !self.status.can_transition_to(next) {
            return Err(TaskError::InvalidTransition {
                task_id: self.id,
                from: self.status,
                to: next,
            });
        }

        let previous = self.status;
        self.status = next;
        self.completed_at = if next.is_completed() { Some(now) } else { None };
        Ok(previous)
    }

    /// Mark as completed
    pub fn complete(&mut self, now: DateTime<Utc>) -> Result<TaskStatus, TaskError> {
        self.change_status(TaskStatus::Completed, now)
    }

    /// Hand the task to another user, returning the previous assignee
    pub fn assign(&mut self, assignee: UserId) -> Result<UserId, TaskError> {
        if self.assignee == assignee {
            return Err(TaskError::AlreadyAssigned {
                task_id: self.id,
                assignee,
            });
        }

        let previous = self.assignee;
        self.assignee = assignee;
        Ok(previous)
    }

    // ========== Persistence ==========

    /// The copy a repository stores after a successful save
    pub fn into_saved(mut self) -> Self {
        self.version += 1;
        self
    }
}

/// Errors that can occur during Task operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TaskError {
    #[error("Invalid status transition for task {task_id}: {from} -> {to}")]
    InvalidTransition {
        task_id: TaskId,
        from: TaskStatus,
        to: TaskStatus,
    },

    #[error("Task {task_id} is already assigned to user {assignee}")]
    AlreadyAssigned { task_id: TaskId, assignee: UserId },
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn new_task() -> Task {
        Task::create(
            TaskId::from_int(1).unwrap(),
            NewTask {
                title: TaskTitle::parse("Ship release").unwrap(),
                description: None,
                priority: TaskPriority::Urgent,
                creator: UserId::from_int(10).unwrap(),
                assignee: UserId::from_int(20).unwrap(),
                category: None,
                due_date: None,
                tags: vec![TagId::from_int(5).unwrap()],
            },
            Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_task_lifecycle() {
        let mut task = new_task();
        assert_eq!(task.status(), TaskStatus::Pending);
        assert_eq!(task.version(), 0);

        let started = task.created_at() + Duration::hours(1);
        let previous = task.change_status(TaskStatus::InProgress, started).unwrap();
        assert_eq!(previous, TaskStatus::Pending);
        assert!(task.completed_at().is_none());

        let done = started + Duration::hours(2);
        task.complete(done).unwrap();
        assert_eq!(task.status(), TaskStatus::Completed);
        assert_eq!(task.completed_at(), Some(done));
    }

    #[test]
    fn test_reopening_clears_completion_stamp() {
        let mut task = new_task();
        let now = task.created_at();
        task.complete(now).unwrap();

        task.change_status(TaskStatus::Pending, now).unwrap();
        assert!(task.completed_at().is_none());
    }

    #[test]
    fn test_invalid_transition() {
        let mut task = new_task();

        // Pending -> Pending is not a transition
        let result = task.change_status(TaskStatus::Pending, task.created_at());
        assert!(matches!(
            result,
            Err(TaskError::InvalidTransition {
                from: TaskStatus::Pending,
                to: TaskStatus::Pending,
                ..
            })
        ));
    }

    #[test]
    fn test_completing_twice_is_rejected() {
        let mut task = new_task();
        let now = task.created_at();
        task.complete(now).unwrap();

        let before = task.clone();
        assert!(task.complete(now + Duration::minutes(5)).is_err());
        // Failed transition leaves the aggregate untouched
        assert_eq!(task, before);
    }

    #[test]
    fn test_assign() {
        let mut task = new_task();
        let next = UserId::from_int(30).unwrap();

        let previous = task.assign(next).unwrap();
        assert_eq!(previous, UserId::from_int(20).unwrap());
        assert_eq!(task.assignee(), next);

        assert!(matches!(
            task.assign(next),
            Err(TaskError::AlreadyAssigned { .. })
        ));
    }

    #[test]
    fn test_into_saved_bumps_version() {
        let task = new_task().into_saved().into_saved();
        assert_eq!(task.version(), 2);
    }
}
