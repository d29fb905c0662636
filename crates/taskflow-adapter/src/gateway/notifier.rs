//! Notifier implementations
//!
//! `TracingNotifier` writes deliveries to the log. `RecordingNotifier` keeps
//! them in memory and can be told to reject specific recipients.

use std::collections::HashSet;
use std::sync::Mutex;

use serde::Serialize;
use tracing::info;
use uuid::Uuid;

use taskflow_domain::{EntityRef, Notifier, NotifyError, UserId};

/// A delivered notification
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub id: Uuid,
    pub recipient: UserId,
    pub title: String,
    pub body: String,
    pub related: Option<EntityRef>,
}

impl Notification {
    fn new(recipient: UserId, title: &str, body: &str, related: Option<EntityRef>) -> Self {
        Self {
            id: Uuid::new_v4(),
            recipient,
            title: title.to_string(),
            body: body.to_string(),
            related,
        }
    }
}

/// Logs each notification at info level
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(
        &self,
        recipient: UserId,
        title: &str,
        body: &str,
        related: Option<EntityRef>,
    ) -> Result<(), NotifyError> {
        let notification = Notification::new(recipient, title, body, related);
        info!(
            notification_id = %notification.id,
            recipient = %recipient,
            related = ?related.map(|r| r.to_string()),
            "{}: {}",
            title,
            body
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
    failing: Mutex<HashSet<UserId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every notification addressed to `recipient`
    pub fn fail_for(&self, recipient: UserId) {
        self.failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(recipient);
    }

    /// Notifications delivered so far, oldest first
    pub fn sent(&self) -> Vec<Notification> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(
        &self,
        recipient: UserId,
        title: &str,
        body: &str,
        related: Option<EntityRef>,
    ) -> Result<(), NotifyError> {
        let rejected = self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(&recipient);
        if rejected {
            return Err(NotifyError {
                recipient,
                reason: "recipient rejected".to_string(),
            });
        }

        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(Notification::new(recipient, title, body, related));
        Ok(())
    }
}
