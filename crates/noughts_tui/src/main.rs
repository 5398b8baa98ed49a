//! Noughts - tic-tac-toe in the terminal against a minimax opponent.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod cli;
mod config;
mod frontend;
mod input;
mod session;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use config::NoughtsConfig;
use frontend::TerminalFrontend;
use noughts::GameController;
use session::Session;
use tracing::{error, info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => NoughtsConfig::from_file(path)?,
        None => NoughtsConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    init_tracing(&config)?;
    run(&config)
}

/// Logs to a file so the TUI is left alone.
fn init_tracing(config: &NoughtsConfig) -> Result<()> {
    let log_file = std::fs::File::create(config.log_file())
        .with_context(|| format!("Failed to create log file {}", config.log_file().display()))?;
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(std::sync::Arc::new(log_file))
        .with_ansi(false)
        .try_init(); // Don't panic if already initialized
    Ok(())
}

/// Plays until the user quits, restoring the terminal on every exit path.
#[instrument(skip_all, fields(seed = ?config.seed()))]
fn run(config: &NoughtsConfig) -> Result<()> {
    info!("Starting Noughts");

    let controller = match config.seed() {
        Some(seed) => GameController::seeded(*seed),
        None => GameController::new(),
    };
    let mut session = Session::new(controller);

    let mut frontend = TerminalFrontend::enter(config)?;
    let res = session.run(&mut frontend);
    let restored = frontend.restore();

    if let Err(err) = &res {
        error!(error = ?err, "Game loop error");
    }
    if let Err(err) = &restored {
        error!(error = ?err, "Failed to restore terminal");
    }
    info!(state = %session.controller().state(), "Goodbye");
    first_error(res, restored)
}

/// The game loop's error wins over a later cleanup error.
fn first_error(res: Result<()>, restored: Result<()>) -> Result<()> {
    res.and(restored)
}
