//! # Taskflow Adapter Layer
//!
//! Concrete implementations of the domain ports (Hexagonal Architecture
//! adapters).
//!
//! ## Structure
//!
//! - `repository/` - Task/user repositories, event stores, unit of work
//! - `gateway/` - Outbound delivery (notifications)

pub mod gateway;
pub mod repository;

pub use gateway::notifier::{Notification, RecordingNotifier, TracingNotifier};
pub use repository::event_store::{InMemoryEventStore, JsonlEventStore};
pub use repository::in_memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use repository::unit_of_work::InMemoryUnitOfWork;
