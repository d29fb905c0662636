//! EventBus - synchronous, best-effort dispatch
//!
//! By the time an event reaches the bus it is already committed. A handler
//! that fails (or panics) is logged and recorded in the `DispatchReport`;
//! the remaining handlers still run and the originating command still
//! succeeds.

use std::panic::{self, AssertUnwindSafe};
use std::thread;
use std::time::Duration;

use tracing::{debug, warn};

use shared::DispatchConfig;
use taskflow_domain::{DomainEvent, EventHandler, EventKind};

use super::registry::HandlerRegistry;

/// How often a failing handler is re-invoked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Attempts per handler, including the first (minimum 1)
    pub max_attempts: u32,
    /// Pause between attempts
    pub backoff: Duration,
}

impl RetryPolicy {
    /// Fire-and-forget: one attempt, no retry
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            backoff: Duration::ZERO,
        }
    }

    pub fn attempts(max_attempts: u32, backoff: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff,
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::none()
    }
}

impl From<&DispatchConfig> for RetryPolicy {
    fn from(config: &DispatchConfig) -> Self {
        Self::attempts(config.max_attempts, config.backoff())
    }
}

/// A handler that gave up
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerFailure {
    pub handler: String,
    pub attempts: u32,
    pub error: String,
}

/// Outcome of one `dispatch` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchReport {
    pub event: EventKind,
    pub attempted: usize,
    pub succeeded: usize,
    pub failures: Vec<HandlerFailure>,
}

impl DispatchReport {
    fn new(event: EventKind) -> Self {
        Self {
            event,
            attempted: 0,
            succeeded: 0,
            failures: Vec::new(),
        }
    }

    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct EventBus {
    registry: HandlerRegistry,
    retry: RetryPolicy,
}

impl EventBus {
    pub fn new(registry: HandlerRegistry, retry: RetryPolicy) -> Self {
        Self { registry, retry }
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    /// Run every handler registered for the event's kind, in order
    pub fn dispatch(&self, event: &DomainEvent) -> DispatchReport {
        let mut report = DispatchReport::new(event.kind());

        for handler in self.registry.handlers_for(event.kind()) {
            report.attempted += 1;

            match self.run(handler.as_ref(), event) {
                Ok(()) => report.succeeded += 1,
                Err(failure) => {
                    warn!(
                        event = event.name(),
                        handler = %failure.handler,
                        attempts = failure.attempts,
                        error = %failure.error,
                        "Event handler failed"
                    );
                    report.failures.push(failure);
                }
            }
        }

        report
    }

    fn run(&self, handler: &dyn EventHandler, event: &DomainEvent) -> Result<(), HandlerFailure> {
        let mut attempt = 0;

        loop {
            attempt += 1;

            let error = match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(event))) {
                Ok(Ok(())) => return Ok(()),
                Ok(Err(e)) => e.to_string(),
                Err(payload) => format!("handler panicked: {}", panic_message(payload.as_ref())),
            };

            if attempt >= self.retry.max_attempts {
                return Err(HandlerFailure {
                    handler: handler.name().to_string(),
                    attempts: attempt,
                    error,
                });
            }

            debug!(
                handler = handler.name(),
                attempt,
                error = %error,
                "Retrying event handler"
            );
            if !self.retry.backoff.is_zero() {
                thread::sleep(self.retry.backoff);
            }
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
