//! CLI Commands

pub mod demo;
pub mod events;

pub use demo::DemoCommand;
pub use events::EventsCommand;
