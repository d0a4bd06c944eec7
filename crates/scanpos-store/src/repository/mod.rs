//! # Repository Module
//!
//! Database repository implementations for ScanPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Access                                      │
//! │                                                                         │
//! │  PersistentCart (write-through)                                        │
//! │       │                                                                 │
//! │       │  db.snapshots().put("cart_items", json)                        │
//! │       ▼                                                                 │
//! │  SnapshotRepository                                                    │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  └── delete(&self, key)                                                │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (snapshots table)                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`snapshot::SnapshotRepository`] - Keyed snapshot persistence

pub mod snapshot;
