//! Client, deal and comment events
//!
//! Raised by the surrounding application rather than by the task command
//! handlers, but stored and dispatched through the same pipeline.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::id::{ClientId, CommentId, DealId, TaskId, UserId};
use crate::port::clock::Clock;

/// `client.created`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClientCreated {
    client_id: ClientId,
    name: String,
    created_by_user_id: UserId,
    occurred_at: DateTime<Utc>,
}

impl ClientCreated {
    pub fn new(
        client_id: ClientId,
        name: impl Into<String>,
        created_by: UserId,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            client_id,
            name: name.into(),
            created_by_user_id: created_by,
            occurred_at: clock.now(),
        }
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn created_by(&self) -> UserId {
        self.created_by_user_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// `deal.stage_changed`
///
/// Deal stages are configured per pipeline by the web layer, so they stay
/// plain strings here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DealStageChanged {
    deal_id: DealId,
    client_id: ClientId,
    old_stage: String,
    new_stage: String,
    changed_by_user_id: UserId,
    occurred_at: DateTime<Utc>,
}

impl DealStageChanged {
    pub fn new(
        deal_id: DealId,
        client_id: ClientId,
        stages: (impl Into<String>, impl Into<String>),
        changed_by: UserId,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            deal_id,
            client_id,
            old_stage: stages.0.into(),
            new_stage: stages.1.into(),
            changed_by_user_id: changed_by,
            occurred_at: clock.now(),
        }
    }

    pub fn deal_id(&self) -> DealId {
        self.deal_id
    }

    pub fn client_id(&self) -> ClientId {
        self.client_id
    }

    pub fn old_stage(&self) -> &str {
        &self.old_stage
    }

    pub fn new_stage(&self) -> &str {
        &self.new_stage
    }

    pub fn changed_by(&self) -> UserId {
        self.changed_by_user_id
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}

/// `comment.added`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentAdded {
    comment_id: CommentId,
    task_id: TaskId,
    author_id: UserId,
    body: String,
    occurred_at: DateTime<Utc>,
}

impl CommentAdded {
    pub fn new(
        comment_id: CommentId,
        task_id: TaskId,
        author: UserId,
        body: impl Into<String>,
        clock: &dyn Clock,
    ) -> Self {
        Self {
            comment_id,
            task_id,
            author_id: author,
            body: body.into(),
            occurred_at: clock.now(),
        }
    }

    pub fn comment_id(&self) -> CommentId {
        self.comment_id
    }

    pub fn task_id(&self) -> TaskId {
        self.task_id
    }

    pub fn author_id(&self) -> UserId {
        self.author_id
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
}
