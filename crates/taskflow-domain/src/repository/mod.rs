//! Repository Traits - The "Ports" of Hexagonal Architecture
//!
//! These traits define WHAT the core needs from persistence, not HOW it
//! is done. That's the adapter's job.
//!
//! ```text
//! Domain Layer          │  Adapter Layer
//! ──────────────────────┼────────────────────────
//! trait TaskRepository  │  InMemoryTaskRepository
//! trait EventStore      │  InMemoryEventStore, JsonlEventStore
//! trait UnitOfWork      │  InMemoryUnitOfWork
//! ```
//!
//! Methods take `&self`: implementations are shared behind `Arc` between
//! command handlers and event handlers, so they carry their own locking.

pub mod event_store;
pub mod task_repository;
pub mod unit_of_work;
pub mod user_repository;
