//! Notification reactions

use std::sync::Arc;

use tracing::debug;

use taskflow_domain::{
    DomainEvent, EntityRef, EventHandler, HandlerError, Notifier, TaskRepository, UserId,
    UserRepository,
};

/// Display name for a user, falling back to the bare id
fn display_name(users: &dyn UserRepository, id: UserId) -> Result<String, HandlerError> {
    Ok(users
        .find(id)?
        .map(|u| u.name().to_string())
        .unwrap_or_else(|| format!("user {}", id)))
}

/// `task.created` → tell the assignee, unless they created it themselves
pub struct NotifyAssigneeOnTaskCreated {
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

impl NotifyAssigneeOnTaskCreated {
    pub fn new(users: Arc<dyn UserRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { users, notifier }
    }
}

impl EventHandler for NotifyAssigneeOnTaskCreated {
    fn name(&self) -> &str {
        "notify-assignee-on-task-created"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEvent::TaskCreated(created) = event else {
            return Ok(());
        };

        if created.assignee_id() == created.creator_id() {
            debug!(task_id = %created.task_id(), "Creator assigned to self, no notification");
            return Ok(());
        }

        let Some(assignee) = self.users.find(created.assignee_id())? else {
            debug!(user_id = %created.assignee_id(), "Assignee not found, skipping");
            return Ok(());
        };

        let creator = display_name(self.users.as_ref(), created.creator_id())?;

        self.notifier.notify(
            assignee.id(),
            "New task assigned",
            &format!(
                "{} assigned you \"{}\" ({} priority)",
                creator,
                created.title(),
                created.priority()
            ),
            Some(EntityRef::task(created.task_id())),
        )?;
        Ok(())
    }
}

/// `task.completed` → tell the creator, unless they completed it themselves
pub struct NotifyCreatorOnTaskCompleted {
    tasks: Arc<dyn TaskRepository>,
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

impl NotifyCreatorOnTaskCompleted {
    pub fn new(
        tasks: Arc<dyn TaskRepository>,
        users: Arc<dyn UserRepository>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            tasks,
            users,
            notifier,
        }
    }
}

impl EventHandler for NotifyCreatorOnTaskCompleted {
    fn name(&self) -> &str {
        "notify-creator-on-task-completed"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEvent::TaskCompleted(completed) = event else {
            return Ok(());
        };

        let Some(task) = self.tasks.find(completed.task_id())? else {
            debug!(task_id = %completed.task_id(), "Task not found, skipping");
            return Ok(());
        };

        if task.creator() == completed.completed_by() {
            return Ok(());
        }

        let Some(creator) = self.users.find(task.creator())? else {
            debug!(user_id = %task.creator(), "Creator not found, skipping");
            return Ok(());
        };

        let completer = display_name(self.users.as_ref(), completed.completed_by())?;

        self.notifier.notify(
            creator.id(),
            "Task completed",
            &format!("{} completed \"{}\"", completer, task.title()),
            Some(EntityRef::task(task.id())),
        )?;
        Ok(())
    }
}

/// `task.assigned` → tell the new assignee, unless they took it themselves
pub struct NotifyAssigneeOnTaskAssigned {
    users: Arc<dyn UserRepository>,
    notifier: Arc<dyn Notifier>,
}

impl NotifyAssigneeOnTaskAssigned {
    pub fn new(users: Arc<dyn UserRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self { users, notifier }
    }
}

impl EventHandler for NotifyAssigneeOnTaskAssigned {
    fn name(&self) -> &str {
        "notify-assignee-on-task-assigned"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let DomainEvent::TaskAssigned(assigned) = event else {
            return Ok(());
        };

        if assigned.assignee_id() == assigned.assigned_by() {
            return Ok(());
        }

        let Some(assignee) = self.users.find(assigned.assignee_id())? else {
            debug!(user_id = %assigned.assignee_id(), "Assignee not found, skipping");
            return Ok(());
        };

        let by = display_name(self.users.as_ref(), assigned.assigned_by())?;

        self.notifier.notify(
            assignee.id(),
            "Task reassigned to you",
            &format!("{} handed you task #{}", by, assigned.task_id()),
            Some(EntityRef::task(assigned.task_id())),
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use taskflow_adapter::{InMemoryTaskRepository, InMemoryUserRepository, RecordingNotifier};
    use taskflow_domain::{
        Clock, FixedClock, NewTask, Task, TaskAssigned, TaskCompleted, TaskCreated, TaskId,
        TaskPriority, TaskTitle, User,
    };

    fn user(id: i64) -> UserId {
        UserId::from_int(id).unwrap()
    }

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap())
    }

    fn users() -> Arc<InMemoryUserRepository> {
        Arc::new(
            InMemoryUserRepository::new()
                .with_user(User::new(user(1), "Alice"))
                .with_user(User::new(user(2), "Bob")),
        )
    }

    fn task(creator: i64, assignee: i64) -> Task {
        Task::create(
            TaskId::from_int(5).unwrap(),
            NewTask {
                title: TaskTitle::parse("Prepare invoice").unwrap(),
                description: None,
                priority: TaskPriority::High,
                creator: user(creator),
                assignee: user(assignee),
                category: None,
                due_date: None,
                tags: vec![],
            },
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_assignee_is_notified_on_create() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyAssigneeOnTaskCreated::new(users(), notifier.clone());

        let event = DomainEvent::from(TaskCreated::new(&task(1, 2), &clock()));
        handler.handle(&event).unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, user(2));
        assert!(sent[0].body.contains("Alice"));
        assert!(sent[0].body.contains("Prepare invoice"));
        assert_eq!(sent[0].related, Some(EntityRef::task(TaskId::from_int(5).unwrap())));
    }

    #[test]
    fn test_self_assignment_notifies_nobody() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyAssigneeOnTaskCreated::new(users(), notifier.clone());

        let event = DomainEvent::from(TaskCreated::new(&task(1, 1), &clock()));
        handler.handle(&event).unwrap();

        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_unknown_assignee_is_skipped() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyAssigneeOnTaskCreated::new(users(), notifier.clone());

        let event = DomainEvent::from(TaskCreated::new(&task(1, 99), &clock()));
        assert!(handler.handle(&event).is_ok());
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_creator_is_notified_on_completion() {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        tasks.save(&task(1, 2)).unwrap();

        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyCreatorOnTaskCompleted::new(tasks, users(), notifier.clone());

        let clock = clock();
        let event = DomainEvent::from(TaskCompleted::new(
            TaskId::from_int(5).unwrap(),
            user(2),
            clock.now(),
            &clock,
        ));
        handler.handle(&event).unwrap();

        let sent = notifier.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].recipient, user(1));
        assert_eq!(sent[0].body, "Bob completed \"Prepare invoice\"");
    }

    #[test]
    fn test_completion_by_creator_notifies_nobody() {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        tasks.save(&task(1, 2)).unwrap();

        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyCreatorOnTaskCompleted::new(tasks, users(), notifier.clone());

        let clock = clock();
        let event = DomainEvent::from(TaskCompleted::new(
            TaskId::from_int(5).unwrap(),
            user(1),
            clock.now(),
            &clock,
        ));
        handler.handle(&event).unwrap();
        assert!(notifier.sent().is_empty());
    }

    #[test]
    fn test_notifier_failure_surfaces_as_handler_error() {
        let notifier = Arc::new(RecordingNotifier::new());
        notifier.fail_for(user(2));
        let handler = NotifyAssigneeOnTaskAssigned::new(users(), notifier.clone());

        let event = DomainEvent::from(TaskAssigned::new(
            TaskId::from_int(5).unwrap(),
            user(1),
            user(2),
            user(1),
            &clock(),
        ));

        assert!(matches!(handler.handle(&event), Err(HandlerError::Notify(_))));
    }

    #[test]
    fn test_other_events_are_ignored() {
        let notifier = Arc::new(RecordingNotifier::new());
        let handler = NotifyAssigneeOnTaskAssigned::new(users(), notifier.clone());

        let event = DomainEvent::from(TaskCreated::new(&task(1, 2), &clock()));
        handler.handle(&event).unwrap();
        assert!(notifier.sent().is_empty());
    }
}
