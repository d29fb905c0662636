//! taskflow - command/domain-event core for task management
//!
//! Usage:
//!   taskflow demo                      - Run a scripted task lifecycle
//!   taskflow events [--name N]         - Print stored event records
//!   taskflow --config taskflow.yaml …  - Load settings from JSON or YAML

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use shared::AppConfig;
use taskflow_app::commands::{DemoCommand, EventsCommand};
use taskflow_app::App;

#[derive(Parser)]
#[command(name = "taskflow")]
#[command(about = "Taskflow - task commands, domain events and reactions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (.json, .yaml or .yml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the scripted command flow
    Demo(DemoCommand),
    /// Print stored events, newest first
    Events(EventsCommand),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => AppConfig::from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => AppConfig::default(),
    };

    // RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .init();

    let app = App::build(&config)?;

    match cli.command {
        Commands::Demo(cmd) => cmd.run(&app),
        Commands::Events(cmd) => cmd.run(&app),
    }
}
