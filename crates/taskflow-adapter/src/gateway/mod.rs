//! Outbound gateways

pub mod notifier;
