//! # scanpos-catalog: Product Catalog Client
//!
//! Reads the remote product catalog and resolves scanned barcodes.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ScannerSession (scanpos-cli)                                          │
//! │       │  accepted barcode                                               │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │               scanpos-catalog (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   lookup_product ──► CatalogClient::fetch_products              │   │
//! │  │        │                   │                                    │   │
//! │  │        │                   └── HttpCatalog (reqwest GET)        │   │
//! │  │        ▼                                                        │   │
//! │  │   protocol::decode_entry (per array element)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼  LookupOutcome::{Found, NotFound}                               │
//! │  ScannerSession::apply_lookup                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`client`] - `CatalogClient` trait and the reqwest implementation
//! - [`protocol`] - Wire DTOs
//! - [`lookup`] - Barcode resolution
//! - [`error`] - Catalog error types

pub mod client;
pub mod error;
pub mod lookup;
pub mod protocol;

pub use client::{parse_catalog_url, CatalogClient, HttpCatalog, DEFAULT_CATALOG_URL};
pub use error::{CatalogError, CatalogResult};
pub use lookup::{lookup_product, LookupOutcome, NotFoundReason};
