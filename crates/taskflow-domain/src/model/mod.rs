//! Domain Models - Value Objects and the Task aggregate
//!
//! Value objects are built only through validating factories and are never
//! mutated; "changing" one means building a new one.

pub mod entity_ref;
pub mod id;
pub mod priority;
pub mod status;
pub mod task;
pub mod title;
pub mod user;
pub mod validation;
