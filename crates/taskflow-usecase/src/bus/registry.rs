//! HandlerRegistry - which handlers react to which event kind
//!
//! Built explicitly at startup and handed to `EventBus::new`. There is no
//! scanning or discovery: if a handler is not registered here, it does not
//! run.

use std::collections::HashMap;
use std::sync::Arc;

use taskflow_domain::{EventHandler, EventKind};

#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: HashMap<EventKind, Vec<Arc<dyn EventHandler>>>,
}

impl HandlerRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for one event kind. Handlers run in registration order.
    pub fn on(mut self, kind: EventKind, handler: Arc<dyn EventHandler>) -> Self {
        self.handlers.entry(kind).or_default().push(handler);
        self
    }

    /// Register `handler` for every event kind
    pub fn on_all(mut self, handler: Arc<dyn EventHandler>) -> Self {
        for kind in EventKind::all() {
            self.handlers
                .entry(*kind)
                .or_default()
                .push(Arc::clone(&handler));
        }
        self
    }

    pub fn handlers_for(&self, kind: EventKind) -> &[Arc<dyn EventHandler>] {
        self.handlers.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Total registrations across all kinds
    pub fn len(&self) -> usize {
        self.handlers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl core::fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut map = f.debug_map();
        for kind in EventKind::all() {
            let names: Vec<&str> = self.handlers_for(*kind).iter().map(|h| h.name()).collect();
            if !names.is_empty() {
                map.entry(&kind.name(), &names);
            }
        }
        map.finish()
    }
}
