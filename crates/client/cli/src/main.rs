//! Headless terminal driver for encounters.
//!
//! Run with: `cargo run -p combat-cli -- run cave`
mod commands;
mod dirs;
mod player;
mod report;

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::Parser;
use commands::{ListEncounters, ListSaves, Run};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

/// Turn-based encounter runner
#[derive(Parser)]
#[command(name = "combat")]
#[command(about = "Resolve encounters from the terminal", long_about = None)]
#[command(version)]
struct Cli {
    /// Also write logs to `<dir>/combat.log`
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Play an encounter to the end
    Run(Run),

    /// List the bundled encounters
    List(ListEncounters),

    /// List save slots
    Saves(ListSaves),
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if it exists (CONTENT_DATA_DIR, SAVE_DATA_DIR, RUST_LOG)
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    let _guard = setup_logging(cli.log_dir.as_deref())?;

    match cli.command {
        Command::Run(cmd) => cmd.execute().await,
        Command::List(cmd) => cmd.execute(),
        Command::Saves(cmd) => cmd.execute(),
    }
}

/// Setup logging to stderr, and to a file when a log directory is given.
///
/// The returned guard flushes the file writer on drop.
fn setup_logging(
    log_dir: Option<&Path>,
) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stderr);

    let (file_layer, guard) = match log_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::never(dir, "combat.log");
            let (non_blocking_file, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking_file)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    if let Some(dir) = log_dir {
        tracing::info!("Log file: {}/combat.log", dir.display());
    }
    Ok(guard)
}
