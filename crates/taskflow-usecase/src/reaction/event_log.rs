//! EventLogHandler - writes every event through the `Logger` port

use std::collections::HashMap;
use std::sync::Arc;

use shared::Logger;
use taskflow_domain::{DomainEvent, EventHandler, HandlerError};

pub struct EventLogHandler {
    logger: Arc<dyn Logger>,
}

impl EventLogHandler {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }
}

impl EventHandler for EventLogHandler {
    fn name(&self) -> &str {
        "event-log"
    }

    fn handle(&self, event: &DomainEvent) -> Result<(), HandlerError> {
        let mut meta = HashMap::new();
        meta.insert("event".to_string(), event.name().to_string());
        meta.insert("subject".to_string(), event.subject().to_string());
        meta.insert("actor_id".to_string(), event.actor().to_string());
        meta.insert("occurred_at".to_string(), event.occurred_at().to_rfc3339());

        self.logger.info(
            &format!("{} on {} by user {}", event.name(), event.subject(), event.actor()),
            Some(&meta),
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::sync::Mutex;
    use taskflow_domain::{ClientCreated, ClientId, FixedClock, UserId};

    #[derive(Default)]
    struct CapturingLogger {
        lines: Mutex<Vec<(String, HashMap<String, String>)>>,
    }

    impl Logger for CapturingLogger {
        fn debug(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}

        fn info(&self, message: &str, meta: Option<&HashMap<String, String>>) {
            self.lines
                .lock()
                .unwrap()
                .push((message.to_string(), meta.cloned().unwrap_or_default()));
        }

        fn warn(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
        fn error(&self, _message: &str, _meta: Option<&HashMap<String, String>>) {}
    }

    #[test]
    fn test_logs_event_with_metadata() {
        let logger = Arc::new(CapturingLogger::default());
        let handler = EventLogHandler::new(logger.clone());

        let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 2, 2, 8, 0, 0).unwrap());
        let event = DomainEvent::from(ClientCreated::new(
            ClientId::from_int(12).unwrap(),
            "Acme",
            UserId::from_int(4).unwrap(),
            &clock,
        ));

        handler.handle(&event).unwrap();

        let lines = logger.lines.lock().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].0, "client.created on client#12 by user 4");
        assert_eq!(lines[0].1["subject"], "client#12");
        assert_eq!(lines[0].1["occurred_at"], "2024-02-02T08:00:00+00:00");
    }
}
