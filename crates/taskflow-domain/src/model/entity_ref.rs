//! EntityRef - a typed pointer to "the thing this is about"
//!
//! Used by notifications (`relatedEntity`) and by audit entries.

use serde::Serialize;

use super::id::{ClientId, CommentId, DealId, TaskId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Task,
    Client,
    Deal,
    Comment,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Task => "task",
            EntityKind::Client => "client",
            EntityKind::Deal => "deal",
            EntityKind::Comment => "comment",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: i64,
}

impl EntityRef {
    pub fn task(id: TaskId) -> Self {
        Self {
            kind: EntityKind::Task,
            id: id.as_int(),
        }
    }

    pub fn client(id: ClientId) -> Self {
        Self {
            kind: EntityKind::Client,
            id: id.as_int(),
        }
    }

    pub fn deal(id: DealId) -> Self {
        Self {
            kind: EntityKind::Deal,
            id: id.as_int(),
        }
    }

    pub fn comment(id: CommentId) -> Self {
        Self {
            kind: EntityKind::Comment,
            id: id.as_int(),
        }
    }
}

impl core::fmt::Display for EntityRef {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "{}#{}", self.kind.as_str(), self.id)
    }
}
