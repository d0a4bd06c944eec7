//! # Product Lookup
//!
//! Resolves a barcode against the catalog. One bulk fetch, then a linear
//! scan on the client side.
//!
//! ## Outcomes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  fetch ok, array, match found      ──► Found(product)                  │
//! │  fetch ok, array, no match         ──► NotFound { NoMatch }            │
//! │  fetch ok, JSON but not an array   ──► NotFound { UnexpectedPayload }  │
//! │  fetch failed (any CatalogError)   ──► NotFound { Failed(message) }    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Lookup never returns an error: every failure degrades to `NotFound` with
//! the scanned barcode so the operator can key the item in by hand.

use scanpos_core::Product;
use tracing::{debug, info, warn};

use crate::client::CatalogClient;
use crate::protocol::decode_entry;

/// Why a lookup produced no product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotFoundReason {
    /// The catalog has no entry with this barcode.
    NoMatch,
    /// The catalog answered with JSON that is not an array.
    UnexpectedPayload,
    /// The request failed.
    Failed(String),
}

/// Result of resolving one barcode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupOutcome {
    Found(Product),
    NotFound {
        barcode: String,
        reason: NotFoundReason,
    },
}

impl LookupOutcome {
    /// Builds a failure outcome.
    pub fn failed(barcode: impl Into<String>, message: impl Into<String>) -> Self {
        LookupOutcome::NotFound {
            barcode: barcode.into(),
            reason: NotFoundReason::Failed(message.into()),
        }
    }

    /// The barcode this outcome is about.
    pub fn barcode(&self) -> &str {
        match self {
            LookupOutcome::Found(product) => &product.barcode,
            LookupOutcome::NotFound { barcode, .. } => barcode,
        }
    }
}

/// Looks up `barcode` in the catalog.
///
/// ## Example
/// ```rust,ignore
/// match lookup_product(catalog.as_ref(), "123").await {
///     LookupOutcome::Found(p) => println!("{} {}", p.name, p.price),
///     LookupOutcome::NotFound { barcode, .. } => println!("key in {}", barcode),
/// }
/// ```
pub async fn lookup_product(client: &dyn CatalogClient, barcode: &str) -> LookupOutcome {
    let payload = match client.fetch_products().await {
        Ok(payload) => payload,
        Err(e) => {
            warn!(barcode = %barcode, error = %e, "Catalog lookup failed");
            return LookupOutcome::failed(barcode, e.to_string());
        }
    };

    let Some(entries) = payload.as_array() else {
        warn!(barcode = %barcode, "Catalog payload is not an array");
        return LookupOutcome::NotFound {
            barcode: barcode.to_string(),
            reason: NotFoundReason::UnexpectedPayload,
        };
    };

    find_in_entries(entries, barcode)
}

/// Linear scan over raw catalog entries. Undecodable entries are skipped.
fn find_in_entries(entries: &[serde_json::Value], barcode: &str) -> LookupOutcome {
    for (index, entry) in entries.iter().enumerate() {
        // Only entries with a matching barcode are decoded.
        if entry.get("barcode").and_then(|b| b.as_str()) != Some(barcode) {
            continue;
        }

        match decode_entry(entry) {
            Ok(product) => {
                info!(barcode = %barcode, name = %product.name, "Product found");
                return LookupOutcome::Found(product);
            }
            Err(reason) => {
                debug!(index, reason = %reason, "Skipping undecodable catalog entry");
            }
        }
    }

    info!(barcode = %barcode, catalog_size = entries.len(), "No catalog match");

    LookupOutcome::NotFound {
        barcode: barcode.to_string(),
        reason: NotFoundReason::NoMatch,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
