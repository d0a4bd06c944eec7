//! # ScanPOS Station Library
//!
//! The terminal scanning station: configuration, decoder source, session,
//! commands, write-through cart and the event loop.
//!
//! ## Module Organization
//! ```text
//! scanpos_cli/
//! ├── lib.rs          ◄─── You are here (logging, runtime, run)
//! ├── cli.rs          ◄─── Command-line flags
//! ├── config.rs       ◄─── ScannerConfig (file → env → flags)
//! ├── decoder.rs      ◄─── Line device → ScanEvent stream
//! ├── session.rs      ◄─── Gate + cart + draft + status line
//! ├── station.rs      ◄─── select! event loop
//! ├── render.rs       ◄─── Cart table and draft view
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   └── cart.rs     ◄─── PersistentCart (write-through snapshots)
//! ├── commands/
//! │   └── mod.rs      ◄─── Operator command parsing and help
//! └── error.rs        ◄─── AppError for every operation
//! ```
//!
//! ## Startup Sequence
//! 1. Parse flags
//! 2. Initialize tracing (stderr)
//! 3. Load configuration (`--write-config` saves it and stops here)
//! 4. Open the snapshot database and hydrate the cart
//! 5. Open the decoder device (optional)
//! 6. Run the event loop on a current-thread runtime

pub mod cli;
pub mod commands;
pub mod config;
pub mod decoder;
pub mod error;
pub mod render;
pub mod session;
pub mod state;
pub mod station;

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use cli::Cli;
use config::ScannerConfig;
use error::{AppError, AppResult};

/// Runs the station with flags from the process arguments.
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    init_tracing();

    let config = ScannerConfig::load_with_cli(&cli)?;
    info!(
        cooldown_ms = config.scanner.cooldown_ms,
        timeout_ms = ?config.catalog.timeout_ms,
        "Configuration loaded"
    );

    if cli.write_config {
        let path = config.save(cli.config.clone())?;
        println!("Configuration written to {}", path.display());
        return Ok(());
    }

    // One thread: every state transition happens on the event loop.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| AppError::internal(format!("Failed to start runtime: {}", e)))?;

    runtime.block_on(station::run_station(config))
}

/// Initializes the tracing subscriber.
///
/// ## Log Levels
/// - `RUST_LOG` wins when set
/// - Default: `info,scanpos=debug,sqlx=warn`
///
/// Logs go to stderr so they never interleave with the operator surface.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,scanpos=debug,sqlx=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
