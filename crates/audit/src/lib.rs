//! # Taskflow Audit
//!
//! A bounded, in-process audit trail. Every committed domain event reaches
//! it through `AuditTrailHandler`.

mod audit_logger;
mod handler;

pub use audit_logger::{AuditEntry, AuditLogger, AuditStats};
pub use handler::AuditTrailHandler;
