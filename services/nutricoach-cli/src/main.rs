//! NutriCoach CLI
//!
//! Operator tool for inspecting phase timelines.
//!
//! ## Commands
//!
//! - `nutricoach timeline --type VIP12 --start 2024-01-01` - Generated phase sessions
//! - `nutricoach status --type STANDARD6 --start 2024-01-01 --on 2024-01-20` - Program status on a day
//! - `nutricoach patterns` - Phase pattern of every plan
//!
//! Output is JSON on stdout; logs go to stderr and follow `RUST_LOG`.

mod commands;
mod config;

use clap::{Parser, Subcommand};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use crate::config::Config;

/// NutriCoach CLI: inspect subscription phase timelines
#[derive(Parser)]
#[command(name = "nutricoach", version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate the phase timeline of a plan
    Timeline(commands::TimelineArgs),

    /// Resolve the program status of a plan on a given day
    Status(commands::StatusArgs),

    /// Print the phase pattern of every plan
    Patterns,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("nutricoach=debug".parse()?))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::from_env()?;
    tracing::debug!(
        final_phase_vippp = ?config.program.final_phase_vippp,
        "Configuration loaded"
    );

    let output = match cli.command {
        Commands::Timeline(args) => commands::timeline(&config, args)?,
        Commands::Status(args) => commands::status(&config, args).await?,
        Commands::Patterns => commands::patterns(&config)?,
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
