//! # Taskflow Application
//!
//! Wiring and subcommands behind the `taskflow` binary.

pub mod commands;
pub mod wiring;

pub use wiring::App;
