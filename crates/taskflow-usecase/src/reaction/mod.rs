//! Reactions - independent handlers run after an event is committed
//!
//! Reactions resolve whatever they reference through the injected
//! repositories. When a referenced actor cannot be found, or the reaction
//! would only tell people about their own action, they skip quietly instead
//! of failing.

mod event_log;
mod notifications;

pub use event_log::EventLogHandler;
pub use notifications::{
    NotifyAssigneeOnTaskAssigned, NotifyAssigneeOnTaskCreated, NotifyCreatorOnTaskCompleted,
};
