//! aicodex: companion overlay code engine
//!
//! Reads key combos from stdin, one per line, and dispatches them to the
//! configured hotkey actions:
//! - `ctrl+shift+o` toggles the overlay
//! - `ctrl+shift+s` requests the next snippet
//! - `ctrl+shift+f` requests code formatting
//!
//! Control lines `:enable`, `:disable` and `:list` gate and inspect the
//! registry. Exits at end of input or on SIGINT/SIGTERM.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use aicodex::config::Settings;
use aicodex::events::CompanionEvent;
use aicodex::hotkey::InputListener;
use aicodex::lifecycle::ShutdownSignal;
use aicodex::state::Companion;

/// Command line arguments
#[derive(Parser, Debug)]
#[command(author, version, about = "AicodeX - Companion Overlay Code Engine", long_about = None)]
struct Args {
    /// Path to the settings file
    #[arg(short = 'c', long = "config", value_name = "PATH")]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short = 'd', long = "debug")]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging; RUST_LOG wins over --debug
    let default_level = if args.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level))
        )
        .init();

    info!(version = aicodex::VERSION, "aicodex starting");

    let config_path = match args.config {
        Some(path) => path,
        None => Settings::default_path().context("failed to resolve settings path")?,
    };
    let settings = Settings::load(&config_path);
    info!(?config_path, debug = args.debug, "configuration loaded");

    let shutdown = ShutdownSignal::new();

    // Input listener -> companion
    let (input_tx, input_rx) = mpsc::channel(32);
    // Companion -> event log
    let (event_tx, mut event_rx) = broadcast::channel::<CompanionEvent>(64);

    let mut companion = Companion::new(&settings, event_tx);
    if companion.manager().is_empty() {
        warn!("no hotkeys registered - check the hotkeys section of the settings file");
    }

    let listener = InputListener::new(input_tx);
    listener.start().context("failed to start input listener")?;
    info!("input listener started");

    tokio::select! {
        // Dispatch input until stdin closes
        _ = companion.run(input_rx) => {
            info!("input closed");
        }

        // Report companion events
        _ = async {
            loop {
                match event_rx.recv().await {
                    Ok(event) => info!(%event, "companion event"),
                    Err(broadcast::error::RecvError::Lagged(n)) => {
                        warn!(skipped = n, "event receiver lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        } => {
            info!("event handler exited");
        }

        // Without signal handlers, run until input closes
        _ = async {
            if let Err(e) = shutdown.wait().await {
                error!(?e, "failed to register signal handlers");
                std::future::pending::<()>().await;
            }
        } => {
            info!("shutdown signal received");
        }
    }

    while let Ok(event) = event_rx.try_recv() {
        info!(%event, "companion event");
    }

    info!("shutting down...");
    listener.stop();
    let removed = companion.unregister_all();
    info!(removed, "hotkeys unregistered");
    info!("aicodex stopped");

    Ok(())
}
