//! Event Bus - fans a committed event out to its registered handlers

mod event_bus;
mod registry;

pub use event_bus::{DispatchReport, EventBus, HandlerFailure, RetryPolicy};
pub use registry::HandlerRegistry;
