//! Unit of Work over the in-memory task repository
//!
//! The repository's write lock is held across the version check, the event
//! append and the aggregate write. A failed append therefore leaves the
//! aggregate exactly as it was, and a concurrent commit on the same task
//! sees the new version or none of it.

use std::sync::Arc;

use tracing::debug;

use taskflow_domain::{CommitError, DomainEvent, EventStore, Task, UnitOfWork};

use super::in_memory::InMemoryTaskRepository;

pub struct InMemoryUnitOfWork {
    tasks: Arc<InMemoryTaskRepository>,
    events: Arc<dyn EventStore>,
}

impl InMemoryUnitOfWork {
    pub fn new(tasks: Arc<InMemoryTaskRepository>, events: Arc<dyn EventStore>) -> Self {
        Self { tasks, events }
    }
}

impl UnitOfWork for InMemoryUnitOfWork {
    fn commit(&self, task: &Task, event: &DomainEvent) -> Result<(), CommitError> {
        self.tasks.save_with(task, || {
            self.events.append(event).map_err(CommitError::from)
        })?;

        debug!(
            task_id = %task.id(),
            version = task.version() + 1,
            event = event.name(),
            "Committed"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::event_store::InMemoryEventStore;
    use chrono::{TimeZone, Utc};
    use taskflow_domain::{
        EventQuery, EventStoreError, FixedClock, NewTask, RepositoryError, TaskCreated,
        TaskPriority, TaskRepository, TaskTitle, UserId,
    };

    fn setup() -> (Arc<InMemoryTaskRepository>, Arc<InMemoryEventStore>, InMemoryUnitOfWork) {
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let events = Arc::new(InMemoryEventStore::new());
        let uow = InMemoryUnitOfWork::new(tasks.clone(), events.clone());
        (tasks, events, uow)
    }

    fn task(tasks: &InMemoryTaskRepository) -> Task {
        let user = UserId::from_int(1).unwrap();
        Task::create(
            tasks.next_id().unwrap(),
            NewTask {
                title: TaskTitle::parse("Book venue").unwrap(),
                description: None,
                priority: TaskPriority::Low,
                creator: user,
                assignee: user,
                category: None,
                due_date: None,
                tags: vec![],
            },
            Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_commit_saves_and_appends() {
        let (tasks, events, uow) = setup();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap());
        let task = task(&tasks);

        uow.commit(&task, &TaskCreated::new(&task, &clock).into())
            .unwrap();

        assert_eq!(tasks.find(task.id()).unwrap().unwrap().version(), 1);
        assert_eq!(events.query(&EventQuery::all()).unwrap().len(), 1);
    }

    #[test]
    fn test_failed_append_keeps_aggregate_unsaved() {
        let (tasks, events, uow) = setup();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap());
        let task = task(&tasks);
        events.fail_appends(true);

        let err = uow
            .commit(&task, &TaskCreated::new(&task, &clock).into())
            .unwrap_err();

        assert!(matches!(
            err,
            CommitError::EventStore(EventStoreError::Unavailable(_))
        ));
        assert!(tasks.find(task.id()).unwrap().is_none());
        assert!(events.is_empty());
    }

    #[test]
    fn test_stale_version_appends_nothing() {
        let (tasks, events, uow) = setup();
        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 4, 1, 8, 0, 0).unwrap());
        let task = task(&tasks);
        let event: DomainEvent = TaskCreated::new(&task, &clock).into();

        uow.commit(&task, &event).unwrap();
        let err = uow.commit(&task, &event).unwrap_err();

        assert!(matches!(
            err,
            CommitError::Repository(RepositoryError::ConcurrencyError {
                expected: 0,
                actual: 1,
                ..
            })
        ));
        assert_eq!(events.len(), 1);
    }
}
