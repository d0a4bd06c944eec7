//! # ScanPOS Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanPOS Station                                  │
//! │                                                                         │
//! │   decoder device ──┐                                                    │
//! │                    ├──► scanpos_cli::run ──► catalog (HTTP GET)        │
//! │   operator stdin ──┘            │                                       │
//! │                                 └──────────► scanpos.db (snapshots)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::process::ExitCode;

fn main() -> ExitCode {
    // Setup lives in lib.rs for testability
    match scanpos_cli::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("scanpos: {}", e);
            ExitCode::FAILURE
        }
    }
}
