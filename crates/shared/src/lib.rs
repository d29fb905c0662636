//! # Taskflow Shared
//!
//! Configuration, the injectable logger port, and error types used across
//! all taskflow crates.

pub mod config;
pub mod error;
pub mod logger;

// Re-exports
pub use config::*;
pub use error::*;
pub use logger::*;
