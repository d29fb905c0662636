//! Domain Events - immutable records of something that already happened
//!
//! Each event type is a plain struct with private fields and an
//! `occurred_at` stamped from the injected `Clock` at construction. There
//! are no setters; an event is never changed after it is built.
//!
//! `DomainEvent` is the closed union the event store and event bus work
//! with. Its `payload()` is the flat key/value map written to storage.

pub mod business;
pub mod handler;
pub mod record;
pub mod task;

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Map, Value};

use crate::model::entity_ref::EntityRef;
use crate::model::id::UserId;

use business::{ClientCreated, CommentAdded, DealStageChanged};
use record::StoredEvent;
use task::{TaskAssigned, TaskCompleted, TaskCreated, TaskStatusChanged};

/// Every event type the core knows about
///
/// Used as the key of the handler registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    TaskCreated,
    TaskStatusChanged,
    TaskCompleted,
    TaskAssigned,
    ClientCreated,
    DealStageChanged,
    CommentAdded,
}

impl EventKind {
    /// Stable identifier written as `event_name`
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::TaskCreated => "task.created",
            EventKind::TaskStatusChanged => "task.status_changed",
            EventKind::TaskCompleted => "task.completed",
            EventKind::TaskAssigned => "task.assigned",
            EventKind::ClientCreated => "client.created",
            EventKind::DealStageChanged => "deal.stage_changed",
            EventKind::CommentAdded => "comment.added",
        }
    }

    pub fn all() -> &'static [EventKind] {
        &[
            EventKind::TaskCreated,
            EventKind::TaskStatusChanged,
            EventKind::TaskCompleted,
            EventKind::TaskAssigned,
            EventKind::ClientCreated,
            EventKind::DealStageChanged,
            EventKind::CommentAdded,
        ]
    }

    pub fn from_name(name: &str) -> Option<EventKind> {
        EventKind::all().iter().copied().find(|k| k.name() == name)
    }
}

impl core::fmt::Display for EventKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainEvent {
    TaskCreated(TaskCreated),
    TaskStatusChanged(TaskStatusChanged),
    TaskCompleted(TaskCompleted),
    TaskAssigned(TaskAssigned),
    ClientCreated(ClientCreated),
    DealStageChanged(DealStageChanged),
    CommentAdded(CommentAdded),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::TaskCreated(_) => EventKind::TaskCreated,
            DomainEvent::TaskStatusChanged(_) => EventKind::TaskStatusChanged,
            DomainEvent::TaskCompleted(_) => EventKind::TaskCompleted,
            DomainEvent::TaskAssigned(_) => EventKind::TaskAssigned,
            DomainEvent::ClientCreated(_) => EventKind::ClientCreated,
            DomainEvent::DealStageChanged(_) => EventKind::DealStageChanged,
            DomainEvent::CommentAdded(_) => EventKind::CommentAdded,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind().name()
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            DomainEvent::TaskCreated(e) => e.occurred_at(),
            DomainEvent::TaskStatusChanged(e) => e.occurred_at(),
            DomainEvent::TaskCompleted(e) => e.occurred_at(),
            DomainEvent::TaskAssigned(e) => e.occurred_at(),
            DomainEvent::ClientCreated(e) => e.occurred_at(),
            DomainEvent::DealStageChanged(e) => e.occurred_at(),
            DomainEvent::CommentAdded(e) => e.occurred_at(),
        }
    }

    /// The user whose action produced the event
    pub fn actor(&self) -> UserId {
        match self {
            DomainEvent::TaskCreated(e) => e.creator_id(),
            DomainEvent::TaskStatusChanged(e) => e.changed_by(),
            DomainEvent::TaskCompleted(e) => e.completed_by(),
            DomainEvent::TaskAssigned(e) => e.assigned_by(),
            DomainEvent::ClientCreated(e) => e.created_by(),
            DomainEvent::DealStageChanged(e) => e.changed_by(),
            DomainEvent::CommentAdded(e) => e.author_id(),
        }
    }

    /// The entity the event is about
    pub fn subject(&self) -> EntityRef {
        match self {
            DomainEvent::TaskCreated(e) => EntityRef::task(e.task_id()),
            DomainEvent::TaskStatusChanged(e) => EntityRef::task(e.task_id()),
            DomainEvent::TaskCompleted(e) => EntityRef::task(e.task_id()),
            DomainEvent::TaskAssigned(e) => EntityRef::task(e.task_id()),
            DomainEvent::ClientCreated(e) => EntityRef::client(e.client_id()),
            DomainEvent::DealStageChanged(e) => EntityRef::deal(e.deal_id()),
            DomainEvent::CommentAdded(e) => EntityRef::comment(e.comment_id()),
        }
    }

    /// Flat key/value payload, `occurred_at` included as RFC 3339
    pub fn payload(&self) -> serde_json::Result<Map<String, Value>> {
        match self {
            DomainEvent::TaskCreated(e) => to_map(e),
            DomainEvent::TaskStatusChanged(e) => to_map(e),
            DomainEvent::TaskCompleted(e) => to_map(e),
            DomainEvent::TaskAssigned(e) => to_map(e),
            DomainEvent::ClientCreated(e) => to_map(e),
            DomainEvent::DealStageChanged(e) => to_map(e),
            DomainEvent::CommentAdded(e) => to_map(e),
        }
    }

    /// The append-only record written to the event store
    pub fn to_record(&self) -> serde_json::Result<StoredEvent> {
        Ok(StoredEvent {
            event_name: self.name().to_string(),
            event_data: self.payload()?,
            occurred_at: self.occurred_at(),
        })
    }
}

fn to_map<T: Serialize>(event: &T) -> serde_json::Result<Map<String, Value>> {
    match serde_json::to_value(event)? {
        Value::Object(map) => Ok(map),
        other => Err(<serde_json::Error as serde::ser::Error>::custom(format!(
            "event payload must serialize to an object, got {}",
            other
        ))),
    }
}

impl From<TaskCreated> for DomainEvent {
    fn from(event: TaskCreated) -> Self {
        DomainEvent::TaskCreated(event)
    }
}

impl From<TaskStatusChanged> for DomainEvent {
    fn from(event: TaskStatusChanged) -> Self {
        DomainEvent::TaskStatusChanged(event)
    }
}

impl From<TaskCompleted> for DomainEvent {
    fn from(event: TaskCompleted) -> Self {
        DomainEvent::TaskCompleted(event)
    }
}

impl From<TaskAssigned> for DomainEvent {
    fn from(event: TaskAssigned) -> Self {
        DomainEvent::TaskAssigned(event)
    }
}

impl From<ClientCreated> for DomainEvent {
    fn from(event: ClientCreated) -> Self {
        DomainEvent::ClientCreated(event)
    }
}

impl From<DealStageChanged> for DomainEvent {
    fn from(event: DealStageChanged) -> Self {
        DomainEvent::DealStageChanged(event)
    }
}

impl From<CommentAdded> for DomainEvent {
    fn from(event: CommentAdded) -> Self {
        DomainEvent::CommentAdded(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::id::{ClientId, DealId, TaskId};
    use crate::model::priority::TaskPriority;
    use crate::model::status::TaskStatus;
    use crate::model::task::{NewTask, Task};
    use crate::model::title::TaskTitle;
    use crate::port::clock::{Clock, FixedClock};
    use chrono::TimeZone;
    use serde_json::json;

    fn clock() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap())
    }

    fn user(id: i64) -> UserId {
        UserId::from_int(id).unwrap()
    }

    fn task() -> Task {
        Task::create(
            TaskId::from_int(7).unwrap(),
            NewTask {
                title: TaskTitle::parse("Ship release").unwrap(),
                description: Some("cut the 1.0 tag".to_string()),
                priority: TaskPriority::Urgent,
                creator: user(1),
                assignee: user(2),
                category: None,
                due_date: None,
                tags: vec![],
            },
            Utc.with_ymd_and_hms(2024, 5, 1, 11, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_task_created_payload() {
        let clock = clock();
        let event = DomainEvent::from(TaskCreated::new(&task(), &clock));

        assert_eq!(event.name(), "task.created");
        assert_eq!(
            Value::Object(event.payload().unwrap()),
            json!({
                "task_id": 7,
                "title": "Ship release",
                "priority": "urgent",
                "user_id": 1,
                "assigned_user_id": 2,
                "occurred_at": "2024-05-01T12:00:00Z",
            })
        );
    }

    #[test]
    fn test_status_changed_payload() {
        let clock = clock();
        let event = DomainEvent::from(TaskStatusChanged::new(
            TaskId::from_int(7).unwrap(),
            TaskStatus::Pending,
            TaskStatus::InProgress,
            user(3),
            &clock,
        ));

        let payload = event.payload().unwrap();
        assert_eq!(payload["old_status"], json!("pending"));
        assert_eq!(payload["new_status"], json!("in_progress"));
        assert_eq!(payload["changed_by_user_id"], json!(3));
        assert_eq!(event.actor(), user(3));
    }

    #[test]
    fn test_completed_keeps_both_timestamps() {
        let clock = clock();
        let completed_at = Utc.with_ymd_and_hms(2024, 5, 1, 11, 30, 0).unwrap();
        let event = DomainEvent::from(TaskCompleted::new(
            TaskId::from_int(7).unwrap(),
            user(2),
            completed_at,
            &clock,
        ));

        let record = event.to_record().unwrap();
        assert_eq!(record.event_name, "task.completed");
        assert_eq!(record.event_data["completed_at"], json!("2024-05-01T11:30:00Z"));
        assert_eq!(record.event_data["occurred_at"], json!("2024-05-01T12:00:00Z"));
        assert_eq!(record.occurred_at, clock.now());
    }

    #[test]
    fn test_value_equality() {
        let clock = clock();
        let a = TaskCreated::new(&task(), &clock);
        let b = TaskCreated::new(&task(), &clock);
        assert_eq!(a, b);

        clock.advance(chrono::Duration::seconds(1));
        let c = TaskCreated::new(&task(), &clock);
        assert_ne!(a, c);
    }

    #[test]
    fn test_subject_and_kind() {
        let clock = clock();
        let event = DomainEvent::from(DealStageChanged::new(
            DealId::from_int(4).unwrap(),
            ClientId::from_int(9).unwrap(),
            ("proposal", "won"),
            user(5),
            &clock,
        ));

        assert_eq!(event.kind(), EventKind::DealStageChanged);
        assert_eq!(event.subject().to_string(), "deal#4");
        assert_eq!(event.payload().unwrap()["new_stage"], json!("won"));
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in EventKind::all() {
            assert_eq!(EventKind::from_name(kind.name()), Some(*kind));
        }
        assert_eq!(EventKind::from_name("task.deleted"), None);
    }
}
