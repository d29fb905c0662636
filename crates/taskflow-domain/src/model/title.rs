//! TaskTitle - trimmed, non-empty, at most 255 characters

use serde::Serialize;
use std::str::FromStr;

use super::validation::InvalidValueObject;

/// Longest accepted title, counted in characters after trimming
pub const MAX_TITLE_CHARS: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct TaskTitle(String);

impl TaskTitle {
    /// Trim and validate a raw title
    pub fn parse(raw: &str) -> Result<Self, InvalidValueObject> {
        let trimmed = raw.trim();

        if trimmed.is_empty() {
            return Err(InvalidValueObject::new("task title", "must not be empty"));
        }

        let chars = trimmed.chars().count();
        if chars > MAX_TITLE_CHARS {
            return Err(InvalidValueObject::new(
                "task title",
                format!(
                    "must be at most {} characters, got {}",
                    MAX_TITLE_CHARS, chars
                ),
            ));
        }

        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for TaskTitle {
    type Err = InvalidValueObject;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl AsRef<str> for TaskTitle {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl core::fmt::Display for TaskTitle {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
