//! Configuration types for taskflow

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::{Result, TaskflowError};

/// Which event store implementation to wire up
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStoreBackend {
    /// Process-local, lost on exit
    #[default]
    Memory,
    /// One JSON record per line in an append-only file
    Jsonl,
}

/// Event store settings
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EventStoreConfig {
    pub backend: EventStoreBackend,

    /// Log file location (required for `jsonl`)
    pub path: Option<PathBuf>,
}

/// Event dispatch settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DispatchConfig {
    /// Attempts per handler, including the first one
    pub max_attempts: u32,

    /// Pause between attempts, in milliseconds
    pub backoff_ms: u64,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            max_attempts: 1,
            backoff_ms: 0,
        }
    }
}

impl DispatchConfig {
    pub fn backoff(&self) -> Duration {
        Duration::from_millis(self.backoff_ms)
    }
}

/// Audit trail settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AuditConfig {
    pub max_entries: usize,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self { max_entries: 10000 }
    }
}

/// Top-level application configuration (taskflow.json / taskflow.yaml)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppConfig {
    /// Default tracing filter; `RUST_LOG` wins when set
    pub log_level: String,
    pub event_store: EventStoreConfig,
    pub dispatch: DispatchConfig,
    pub audit: AuditConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            event_store: EventStoreConfig::default(),
            dispatch: DispatchConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a JSON or YAML file, chosen by extension
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;

        let config: Self = match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => serde_yaml::from_str(&content)?,
            _ => serde_json::from_str(&content)?,
        };

        config.validate()?;
        Ok(config)
    }

    /// Reject combinations that cannot be wired
    pub fn validate(&self) -> Result<()> {
        if self.event_store.backend == EventStoreBackend::Jsonl && self.event_store.path.is_none() {
            return Err(TaskflowError::Config(
                "eventStore.path is required for the jsonl backend".to_string(),
            ));
        }

        if self.dispatch.max_attempts == 0 {
            return Err(TaskflowError::Config(
                "dispatch.maxAttempts must be at least 1".to_string(),
            ));
        }

        if self.audit.max_entries == 0 {
            return Err(TaskflowError::Config(
                "audit.maxEntries must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
