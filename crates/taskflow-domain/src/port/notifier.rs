//! Notifier - delivers a message to a user
//!
//! Delivery is fire-and-forget from the command's point of view: a failed
//! notification surfaces as a handler failure that the event bus logs.

use thiserror::Error;

use crate::model::entity_ref::EntityRef;
use crate::model::id::UserId;

pub trait Notifier: Send + Sync {
    fn notify(
        &self,
        recipient: UserId,
        title: &str,
        body: &str,
        related: Option<EntityRef>,
    ) -> Result<(), NotifyError>;
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Notification to user {recipient} failed: {reason}")]
pub struct NotifyError {
    pub recipient: UserId,
    pub reason: String,
}
