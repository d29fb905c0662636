//! TaskStatus - the task state machine
//!
//! ```text
//!   pending ◄──────► in_progress
//!      ▲  \            /  ▲
//!      │   ▼          ▼   │
//!      └──── completed ───┘
//! ```
//!
//! Every state may move to every *other* state. Staying put is not a
//! transition: `can_transition_to(self)` is false, so a request to move a
//! task into the status it already has is rejected.

use serde::Serialize;
use std::str::FromStr;

use super::validation::InvalidValueObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    /// The transition table. Exhaustive: a new state will not compile
    /// until its row is written.
    pub fn allowed_transitions(&self) -> &'static [TaskStatus] {
        match self {
            TaskStatus::Pending => &[TaskStatus::InProgress, TaskStatus::Completed],
            TaskStatus::InProgress => &[TaskStatus::Pending, TaskStatus::Completed],
            TaskStatus::Completed => &[TaskStatus::Pending, TaskStatus::InProgress],
        }
    }

    pub fn can_transition_to(&self, next: TaskStatus) -> bool {
        self.allowed_transitions().contains(&next)
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, TaskStatus::Completed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TaskStatus::Pending => "pending",
            TaskStatus::InProgress => "in_progress",
            TaskStatus::Completed => "completed",
        }
    }

    pub fn all() -> &'static [TaskStatus] {
        &[
            TaskStatus::Pending,
            TaskStatus::InProgress,
            TaskStatus::Completed,
        ]
    }
}

impl FromStr for TaskStatus {
    type Err = InvalidValueObject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        TaskStatus::all()
            .iter()
            .copied()
            .find(|status| status.as_str() == literal)
            .ok_or_else(|| {
                InvalidValueObject::new(
                    "task status",
                    format!(
                        "unknown literal '{}' (expected pending, in_progress or completed)",
                        literal
                    ),
                )
            })
    }
}

impl core::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
