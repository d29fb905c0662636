//! AuditTrailHandler - feeds every dispatched event into an `AuditLogger`

use std::sync::{Arc, Mutex};

use taskflow_domain::{DomainEvent, EventHandler, HandlerError};

use crate::audit_logger::AuditLogger;

#[derive(Debug, Clone)]
pub struct AuditTrailHandler {
    logger: Arc<Mutex<AuditLogger>>,
}

impl AuditTrailHandler {
    pub fn new(logger: Arc<Mutex<AuditLogger>>) -> Self {
        Self { logger }
    }

    /// Shared handle for read-side consumers
    pub fn logger(&self) -> Arc<Mutex<AuditLogger>> {
        Arc::clone(&self.logger)
    }
}

impl EventHandler for AuditTrailHandler {
    fn name(&self) -> &str {
        "audit-trail"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let mut logger = self
            .logger
            .lock()
            .map_err(|_| HandlerError::Other("audit logger lock poisoned".to_string()))?;
        logger
            .record(event)
            .map_err(|e| HandlerError::Other(format!("Failed to serialize audit entry: {}", e)))
    }
}
