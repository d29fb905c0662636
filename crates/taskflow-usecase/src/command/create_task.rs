//! CreateTask - open a new task in `pending`

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use taskflow_domain::{
    CategoryId, DomainEvent, NewTask, TagId, Task, TaskCreated, TaskId, TaskPriority, TaskTitle,
    UserId,
};

use super::{CommandDeps, CommandHandler};
use crate::error::CommandError;

/// Raw input for creating a task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateTask {
    title: String,
    description: Option<String>,
    priority: String,
    creator_id: i64,
    assignee_id: i64,
    category_id: Option<i64>,
    due_date: Option<DateTime<Utc>>,
    tag_ids: Vec<i64>,
}

impl CreateTask {
    pub fn new(
        title: impl Into<String>,
        priority: impl Into<String>,
        creator_id: i64,
        assignee_id: i64,
    ) -> Self {
        Self {
            title: title.into(),
            description: None,
            priority: priority.into(),
            creator_id,
            assignee_id,
            category_id: None,
            due_date: None,
            tag_ids: Vec::new(),
        }
    }

    /// Builder: set the description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Builder: file under a category
    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Builder: set the due date
    pub fn with_due_date(mut self, due_date: DateTime<Utc>) -> Self {
        self.due_date = Some(due_date);
        self
    }

    /// Builder: attach tags
    pub fn with_tags(mut self, tag_ids: impl IntoIterator<Item = i64>) -> Self {
        self.tag_ids.extend(tag_ids);
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn priority(&self) -> &str {
        &self.priority
    }

    pub fn creator_id(&self) -> i64 {
        self.creator_id
    }

    pub fn assignee_id(&self) -> i64 {
        self.assignee_id
    }

    pub fn category_id(&self) -> Option<i64> {
        self.category_id
    }

    pub fn due_date(&self) -> Option<DateTime<Utc>> {
        self.due_date
    }

    pub fn tag_ids(&self) -> &[i64] {
        &self.tag_ids
    }
}

pub struct CreateTaskHandler {
    deps: CommandDeps,
}

impl CreateTaskHandler {
    pub fn new(deps: CommandDeps) -> Self {
        Self { deps }
    }

    fn validate(command: &CreateTask) -> Result<NewTask, CommandError> {
        let title = TaskTitle::parse(command.title())?;
        let priority: TaskPriority = command.priority().parse()?;
        let creator = UserId::from_int(command.creator_id())?;
        let assignee = UserId::from_int(command.assignee_id())?;
        let category = command
            .category_id()
            .map(CategoryId::from_int)
            .transpose()?;
        let tags = command
            .tag_ids()
            .iter()
            .map(|id| TagId::from_int(*id))
            .collect::<Result<Vec<_>, _>>()?;

        let description = command
            .description()
            .map(str::trim)
            .filter(|d| !d.is_empty())
            .map(str::to_string);

        Ok(NewTask {
            title,
            description,
            priority,
            creator,
            assignee,
            category,
            due_date: command.due_date(),
            tags,
        })
    }
}

impl CommandHandler for CreateTaskHandler {
    type Command = CreateTask;
    type Output = TaskId;

    fn handle(&self, command: CreateTask) -> Result<TaskId, CommandError> {
        debug!(
            creator_id = command.creator_id(),
            assignee_id = command.assignee_id(),
            "Handling CreateTask"
        );

        let new_task = Self::validate(&command)?;

        self.deps.require_user(new_task.creator)?;
        self.deps.require_user(new_task.assignee)?;

        let id = self.deps.tasks.next_id()?;
        let task = Task::create(id, new_task, self.deps.clock.now());

        let event = DomainEvent::from(TaskCreated::new(&task, self.deps.clock.as_ref()));
        self.deps.commit_and_dispatch(&task, event)?;

        info!(
            task_id = %id,
            priority = %task.priority(),
            assignee_id = %task.assignee(),
            "Task created"
        );
        Ok(id)
    }
}
