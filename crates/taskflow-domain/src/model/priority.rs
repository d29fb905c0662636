//! TaskPriority - closed set of priority levels with ordinal weights

use serde::Serialize;
use std::str::FromStr;

use super::validation::InvalidValueObject;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    Medium,
    High,
    Urgent,
}

impl TaskPriority {
    /// Ordinal weight used for comparisons (1 = low .. 4 = urgent)
    pub fn weight(&self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
            TaskPriority::Urgent => 4,
        }
    }

    pub fn is_higher_than(&self, other: TaskPriority) -> bool {
        self.weight() > other.weight()
    }

    /// The literal used in commands and event payloads
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskPriority::Low => "low",
            TaskPriority::Medium => "medium",
            TaskPriority::High => "high",
            TaskPriority::Urgent => "urgent",
        }
    }

    pub fn all() -> &'static [TaskPriority] {
        &[
            TaskPriority::Low,
            TaskPriority::Medium,
            TaskPriority::High,
            TaskPriority::Urgent,
        ]
    }
}

impl FromStr for TaskPriority {
    type Err = InvalidValueObject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let literal = s.trim();
        TaskPriority::all()
            .iter()
            .copied()
            .find(|p| p.as_str() == literal)
            .ok_or_else(|| {
                InvalidValueObject::new(
                    "task priority",
                    format!(
                        "unknown literal '{}' (expected low, medium, high or urgent)",
                        literal
                    ),
                )
            })
    }
}

impl core::fmt::Display for TaskPriority {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}
