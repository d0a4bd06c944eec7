//! # Station Event Loop
//!
//! Wires the collaborators to the session and runs until `quit` or the end
//! of standard input.
//!
//! ## Loop Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    tokio::select! (current thread)                      │
//! │                                                                         │
//! │  decoder event      ──► session.accept_scan ──► spawn lookup (maybe)   │
//! │  stdin line         ──► session.handle_line ──► spawn lookup / print   │
//! │  lookup finished    ──► session.apply_lookup                           │
//! │  re-arm deadline    ──► session.poll_rearm                             │
//! │                                                                         │
//! │  At most one lookup task exists at a time. The gate guarantees it:     │
//! │  nothing is accepted between an accept and the matching apply_lookup.  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stdout carries the operator surface. Logs go to stderr.

use std::sync::Arc;
use std::time::Instant;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use scanpos_catalog::{lookup_product, CatalogClient, HttpCatalog, LookupOutcome};
use scanpos_store::{Database, DbConfig, SnapshotStore};

use crate::config::ScannerConfig;
use crate::decoder::{open_decoder, DecoderEvent, DecoderHandle};
use crate::error::{AppError, AppResult, ErrorCode};
use crate::session::{CameraStatus, Reply, ScannerSession, StatusLine};
use crate::state::PersistentCart;

/// A lookup running on its own task.
struct InFlight {
    barcode: String,
    handle: JoinHandle<LookupOutcome>,
}

/// Runs the station until the operator quits.
pub async fn run_station(config: ScannerConfig) -> AppResult<()> {
    let db_path = config.database_path()?;
    let db = Database::new(DbConfig::new(&db_path)).await?;
    if !db.health_check().await {
        return Err(AppError::new(
            ErrorCode::DatabaseError,
            format!("Snapshot database at {} is not usable", db_path.display()),
        ));
    }

    let store: Arc<dyn SnapshotStore> = Arc::new(db.snapshots());
    let cart = PersistentCart::hydrate(store, config.storage.snapshot_key.clone()).await?;

    let http_catalog = HttpCatalog::new(&config.catalog.url, config.lookup_timeout())?;
    let catalog_url = http_catalog.url().to_string();
    let catalog: Arc<dyn CatalogClient> = Arc::new(http_catalog);
    if config.lookup_timeout().is_none() {
        debug!("No catalog timeout configured; a hung request keeps the scanner busy");
    }

    let (mut decoder, camera) = match config.device() {
        None => (None, CameraStatus::NotConfigured),
        Some(path) => match open_decoder(path).await {
            Ok(handle) => (Some(handle), CameraStatus::Live),
            Err(e) => (None, CameraStatus::Unavailable(e.message)),
        },
    };

    info!(
        catalog = %catalog_url,
        db = %db_path.display(),
        camera = ?camera,
        "Station ready"
    );

    let mut session = ScannerSession::new(config, cart, camera);
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    let mut in_flight: Option<InFlight> = None;

    println!("ScanPOS. Type 'help' for commands.");
    let mut shown = print_status(&session, None);

    loop {
        let rearm = session.rearm_deadline();
        let rearm_at = tokio::time::Instant::from_std(rearm.unwrap_or_else(Instant::now));

        tokio::select! {
            event = next_decode(&mut decoder), if decoder.is_some() => {
                match event {
                    Some(DecoderEvent::Decoded(scan)) => {
                        if let Some(barcode) = session.accept_scan(&scan) {
                            in_flight = Some(spawn_lookup(&catalog, barcode));
                        }
                    }
                    Some(DecoderEvent::Unavailable(reason)) => {
                        session.camera_lost(reason);
                        decoder = None;
                    }
                    None => {
                        session.camera_lost("Decoder stopped");
                        decoder = None;
                    }
                }
            }

            line = input.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => {
                        info!("Input closed");
                        break;
                    }
                    Err(e) => {
                        warn!(error = %e, "Failed to read input");
                        break;
                    }
                };

                match session.handle_line(&line, Instant::now()).await {
                    Reply::Done => {}
                    Reply::Show(text) => println!("{}", text),
                    Reply::StartLookup(barcode) => {
                        in_flight = Some(spawn_lookup(&catalog, barcode));
                    }
                    Reply::Quit => break,
                }
            }

            outcome = finish_lookup(&mut in_flight), if in_flight.is_some() => {
                in_flight = None;
                session.apply_lookup(outcome, Instant::now()).await;
            }

            _ = tokio::time::sleep_until(rearm_at), if rearm.is_some() => {
                session.poll_rearm(Instant::now());
            }
        }

        shown = print_status(&session, Some(&shown));
    }

    if let Some(pending) = in_flight.take() {
        debug!(barcode = %pending.barcode, "Abandoning in-flight lookup on exit");
        pending.handle.abort();
    }

    db.close().await;
    info!("Station stopped");
    Ok(())
}

/// Prints the status line if it changed. Returns what is now on screen.
fn print_status(session: &ScannerSession, previous: Option<&StatusLine>) -> StatusLine {
    let current = session.status();
    if previous != Some(current) {
        println!("{}", current);
    }
    current.clone()
}

fn spawn_lookup(catalog: &Arc<dyn CatalogClient>, barcode: String) -> InFlight {
    let catalog = Arc::clone(catalog);
    let target = barcode.clone();
    let handle = tokio::spawn(async move { lookup_product(catalog.as_ref(), &target).await });
    InFlight { barcode, handle }
}

async fn next_decode(decoder: &mut Option<DecoderHandle>) -> Option<DecoderEvent> {
    match decoder {
        Some(handle) => handle.recv().await,
        None => std::future::pending().await,
    }
}

/// Waits for the in-flight lookup. A panicked task degrades to a failure.
async fn finish_lookup(in_flight: &mut Option<InFlight>) -> LookupOutcome {
    match in_flight {
        Some(pending) => match (&mut pending.handle).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(barcode = %pending.barcode, error = %e, "Lookup task failed");
                LookupOutcome::failed(pending.barcode.clone(), e.to_string())
            }
        },
        None => std::future::pending().await,
    }
}
