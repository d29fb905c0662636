//! Persistence Adapters - Repository implementations
//!
//! These implement the repository traits from taskflow-domain.

pub mod event_store;
pub mod in_memory;
pub mod unit_of_work;
