//! # Taskflow Use Case Layer
//!
//! Orchestrates a command from validation to dispatch:
//!
//! ```text
//! Command ─► CommandHandler ─► validate (value objects)
//!                            ─► load aggregate (TaskRepository)
//!                            ─► mutate (state machine)
//!                            ─► UnitOfWork::commit (save + append, atomic)
//!                            ─► EventBus::dispatch (best effort)
//!                                   └─► EventHandler, EventHandler, ...
//! ```
//!
//! Everything before dispatch is fatal to the command and returned to the
//! caller. Everything from dispatch on is logged and reported, never
//! returned as an error.

pub mod bus;
pub mod command;
pub mod error;
pub mod reaction;

pub use taskflow_domain;

pub use bus::{DispatchReport, EventBus, HandlerFailure, HandlerRegistry, RetryPolicy};
pub use command::{
    AssignTask, AssignTaskHandler, ChangeTaskStatus, ChangeTaskStatusHandler, CommandDeps,
    CommandHandler, CompleteTask, CompleteTaskHandler, CreateTask, CreateTaskHandler,
};
pub use error::CommandError;
pub use reaction::{
    EventLogHandler, NotifyAssigneeOnTaskAssigned, NotifyAssigneeOnTaskCreated,
    NotifyCreatorOnTaskCompleted,
};
