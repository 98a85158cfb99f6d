//! Headless battle driver.
//!
//! Loads a level from a content directory, auto-plays it and reports the
//! outcome. Run with: `tactics play --content content --level intro`

mod commands;

use anyhow::Result;
use clap::Parser;
use commands::{Play, Show};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Turn-based tactical battles from the command line
#[derive(Parser)]
#[command(name = "tactics")]
#[command(about = "Load, play and inspect tactical battles", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Auto-play a level with every side under AI control
    Play(Play),

    /// Print a level's battlefield and roster
    Show(Show),
}

#[tokio::main]
async fn main() -> Result<()> {
    setup_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Play(cmd) => cmd.execute().await,
        Command::Show(cmd) => cmd.execute(),
    }
}

/// Logs to stderr, `info` unless `RUST_LOG` says otherwise.
fn setup_logging() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
