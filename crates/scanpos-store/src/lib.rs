//! # scanpos-store: Snapshot Store for ScanPOS
//!
//! Keyed snapshot persistence on a local SQLite file, using sqlx for async
//! access. The station keeps exactly one snapshot: the cart.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanPOS Data Flow                                │
//! │                                                                         │
//! │  PersistentCart (scanpos-cli)                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  scanpos-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐    ┌──────────────┐ │   │
//! │  │   │   Database    │    │  Repositories  │    │  Migrations  │ │   │
//! │  │   │   (pool.rs)   │    │ (snapshot.rs)  │    │  (embedded)  │ │   │
//! │  │   │               │    │                │    │              │ │   │
//! │  │   │ SqlitePool    │◄───│ SnapshotRepo   │    │ 001_snap-    │ │   │
//! │  │   │ Connection    │    │ SnapshotStore  │    │ shots.sql    │ │   │
//! │  │   └───────────────┘    └────────────────┘    └──────────────┘ │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   SQLite file: <data dir>/scanpos.db                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Snapshot repository and the `SnapshotStore` seam
//!
//! ## Usage
//!
//! ```rust,ignore
//! use scanpos_store::{Database, DbConfig, SnapshotStore};
//!
//! let db = Database::new(DbConfig::new("path/to/scanpos.db")).await?;
//! let store = db.snapshots();
//! store.save("cart_items", "[]").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use repository::snapshot::{Snapshot, SnapshotRepository, SnapshotStore};
