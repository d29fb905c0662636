//! Dependency Injection & Wiring
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  App::build(config)                                             │
//! │    ├── Event store: InMemoryEventStore | JsonlEventStore        │
//! │    ├── InMemoryTaskRepository, InMemoryUserRepository           │
//! │    ├── InMemoryUnitOfWork (tasks + event store)                 │
//! │    ├── HandlerRegistry                                          │
//! │    │     ├── task.created   → NotifyAssigneeOnTaskCreated       │
//! │    │     ├── task.completed → NotifyCreatorOnTaskCompleted      │
//! │    │     ├── task.assigned  → NotifyAssigneeOnTaskAssigned      │
//! │    │     └── every event    → EventLogHandler, AuditTrailHandler│
//! │    └── EventBus (RetryPolicy from config)                       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use anyhow::Context;
use tracing::info;

use audit::{AuditLogger, AuditTrailHandler};
use shared::{AppConfig, EventStoreBackend, TracingLogger};
use taskflow_adapter::{
    InMemoryEventStore, InMemoryTaskRepository, InMemoryUnitOfWork, InMemoryUserRepository,
    JsonlEventStore, TracingNotifier,
};
use taskflow_domain::{Clock, EventKind, EventStore, Notifier, SystemClock};
use taskflow_usecase::{
    CommandDeps, EventBus, EventLogHandler, HandlerRegistry, NotifyAssigneeOnTaskAssigned,
    NotifyAssigneeOnTaskCreated, NotifyCreatorOnTaskCompleted, RetryPolicy,
};

/// Everything a subcommand needs, wired once
pub struct App {
    pub deps: CommandDeps,
    pub tasks: Arc<InMemoryTaskRepository>,
    pub users: Arc<InMemoryUserRepository>,
    pub events: Arc<dyn EventStore>,
    pub audit: Arc<Mutex<AuditLogger>>,
}

impl App {
    pub fn build(config: &AppConfig) -> anyhow::Result<Self> {
        Self::build_with(config, Arc::new(SystemClock), Arc::new(TracingNotifier))
    }

    pub fn build_with(
        config: &AppConfig,
        clock: Arc<dyn Clock>,
        notifier: Arc<dyn Notifier>,
    ) -> anyhow::Result<Self> {
        config.validate()?;

        let events = open_event_store(config)?;
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let users = Arc::new(InMemoryUserRepository::new());
        let audit = Arc::new(Mutex::new(AuditLogger::from_config(&config.audit)));

        let registry = HandlerRegistry::new()
            .on(
                EventKind::TaskCreated,
                Arc::new(NotifyAssigneeOnTaskCreated::new(
                    users.clone(),
                    notifier.clone(),
                )),
            )
            .on(
                EventKind::TaskCompleted,
                Arc::new(NotifyCreatorOnTaskCompleted::new(
                    tasks.clone(),
                    users.clone(),
                    notifier.clone(),
                )),
            )
            .on(
                EventKind::TaskAssigned,
                Arc::new(NotifyAssigneeOnTaskAssigned::new(users.clone(), notifier)),
            )
            .on_all(Arc::new(EventLogHandler::new(Arc::new(TracingLogger))))
            .on_all(Arc::new(AuditTrailHandler::new(audit.clone())));

        let retry = RetryPolicy::from(&config.dispatch);
        info!(
            backend = ?config.event_store.backend,
            handlers = registry.len(),
            max_attempts = retry.max_attempts,
            "Wiring complete"
        );

        let deps = CommandDeps {
            tasks: tasks.clone(),
            users: users.clone(),
            unit_of_work: Arc::new(InMemoryUnitOfWork::new(tasks.clone(), events.clone())),
            clock,
            bus: Arc::new(EventBus::new(registry, retry)),
        };

        Ok(Self {
            deps,
            tasks,
            users,
            events,
            audit,
        })
    }
}

fn open_event_store(config: &AppConfig) -> anyhow::Result<Arc<dyn EventStore>> {
    match config.event_store.backend {
        EventStoreBackend::Memory => Ok(Arc::new(InMemoryEventStore::new())),
        EventStoreBackend::Jsonl => {
            let path = config
                .event_store
                .path
                .as_ref()
                .context("eventStore.path is required for the jsonl backend")?;
            let store = JsonlEventStore::open(path)
                .with_context(|| format!("Failed to open event log {}", path.display()))?;
            Ok(Arc::new(store))
        }
    }
}
