//! Ports - collaborators the core calls out to
//!
//! Injected through constructors, never looked up globally.

pub mod clock;
pub mod notifier;
