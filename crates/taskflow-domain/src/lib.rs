//! # Taskflow Domain Layer
//!
//! The command/event core's vocabulary: self-validating value objects, the
//! Task aggregate with its status state machine, immutable domain events, and
//! the ports the outer layers implement.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Domain Layer (This Crate)                     │
//! │  ┌─────────────────────────────────────────────────────────────┐│
//! │  │  model/      - Value Objects & the Task aggregate           ││
//! │  │  event/      - Domain events, stored records, handler port  ││
//! │  │  repository/ - Persistence ports (not implementations)      ││
//! │  │  port/       - Clock & Notifier collaborators               ││
//! │  └─────────────────────────────────────────────────────────────┘│
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing in here performs I/O. Adapters decide whether events land in
//! memory, in a file, or in a database.

pub mod event;
pub mod model;
pub mod port;
pub mod repository;

// Re-export commonly used types
pub use model::{
    entity_ref::{EntityKind, EntityRef},
    id::{CategoryId, ClientId, CommentId, DealId, TagId, TaskId, UserId},
    priority::TaskPriority,
    status::TaskStatus,
    task::{NewTask, Task, TaskError},
    title::TaskTitle,
    user::User,
    validation::InvalidValueObject,
};

pub use event::{
    business::{ClientCreated, CommentAdded, DealStageChanged},
    handler::{EventHandler, HandlerError},
    record::{EventQuery, StoredEvent},
    task::{TaskAssigned, TaskCompleted, TaskCreated, TaskStatusChanged},
    DomainEvent, EventKind,
};

pub use repository::{
    event_store::{EventStore, EventStoreError},
    task_repository::{RepositoryError, TaskRepository},
    unit_of_work::{CommitError, UnitOfWork},
    user_repository::UserRepository,
};

pub use port::{
    clock::{Clock, FixedClock, SystemClock},
    notifier::{Notifier, NotifyError},
};
