//! taskflow events - print stored event records as JSON

use chrono::{DateTime, Utc};
use clap::Args;

use taskflow_domain::{EventQuery, StoredEvent};

use crate::wiring::App;

/// With the `memory` backend the log only lives for one process, so this is
/// mostly useful against a `jsonl` event store.
#[derive(Debug, Args)]
pub struct EventsCommand {
    /// Only records with this event name (e.g. task.completed)
    #[arg(short, long)]
    pub name: Option<String>,

    /// Only records at or after this RFC 3339 timestamp
    #[arg(short, long)]
    pub since: Option<DateTime<Utc>>,

    /// Maximum number of records
    #[arg(short, long)]
    pub limit: Option<usize>,
}

impl EventsCommand {
    pub fn query(&self) -> EventQuery {
        EventQuery {
            event_name: self.name.clone(),
            since: self.since,
            limit: self.limit,
        }
    }

    pub fn fetch(&self, app: &App) -> anyhow::Result<Vec<StoredEvent>> {
        Ok(app.events.query(&self.query())?)
    }

    pub fn run(&self, app: &App) -> anyhow::Result<()> {
        let records = self.fetch(app)?;
        println!("{}", serde_json::to_string_pretty(&records)?);
        Ok(())
    }
}
