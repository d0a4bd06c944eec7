//! # Domain Types
//!
//! Core domain types used throughout ScanPOS.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │   ScanEvent     │   │    Product      │   │    CartLine     │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  barcode        │──►│  barcode (key)  │──►│  id (LineId)    │       │
//! │  │  timestamp      │   │  name           │   │  barcode        │       │
//! │  └─────────────────┘   │  price (Money)  │   │  name, price    │       │
//! │     from decoder       └─────────────────┘   │  quantity ≥ 1   │       │
//! │                           from catalog       └─────────────────┘       │
//! │                                                  in the ledger          │
//! │                        ┌─────────────────┐                              │
//! │                        │   LineDraft     │  editable form between      │
//! │                        │  barcode, name, │  lookup and ledger.add      │
//! │                        │  price?, qty    │                              │
//! │                        └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Instant;
use uuid::Uuid;

use crate::money::Money;

// =============================================================================
// Scan Event
// =============================================================================

/// A single decode reported by the scanner device.
///
/// Ephemeral: never persisted, only fed through the debounce gate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanEvent {
    /// Decoded barcode text.
    pub barcode: String,

    /// When the decode was observed.
    pub timestamp: Instant,
}

impl ScanEvent {
    /// Creates a scan event for `barcode` observed at `timestamp`.
    pub fn new(barcode: impl Into<String>, timestamp: Instant) -> Self {
        ScanEvent {
            barcode: barcode.into(),
            timestamp,
        }
    }
}

// =============================================================================
// Product
// =============================================================================

/// A catalog product. Immutable from the station's point of view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Barcode (EAN-13, UPC-A, ...). Unique key within the catalog.
    pub barcode: String,

    /// Display name shown to the cashier.
    pub name: String,

    /// Unit price.
    pub price: Money,
}

// =============================================================================
// Line Id
// =============================================================================

/// Opaque identifier of a cart line.
///
/// Freshly generated (UUID v4) when a line is appended; stable for the
/// lifetime of the line, including across snapshot reloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(Uuid);

impl LineId {
    /// Generates a new random line id.
    pub fn generate() -> Self {
        LineId(Uuid::new_v4())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line item in the cart.
///
/// ## Invariants
/// - At most one line per barcode (enforced by the ledger)
/// - `quantity >= 1`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: LineId,
    pub barcode: String,
    pub name: String,
    /// Unit price, frozen when the line was created.
    #[serde(rename = "price_cents")]
    pub price: Money,
    pub quantity: i64,
}

impl CartLine {
    /// Returns unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price.multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Line Draft
// =============================================================================

/// The editable product-details record submitted to `CartLedger::add`.
///
/// A lookup fills it from the found product, or leaves only the barcode so
/// the operator can type the name and price of an unknown item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDraft {
    pub barcode: String,
    pub name: String,
    pub price: Option<Money>,
    pub quantity: i64,
}

impl LineDraft {
    /// A blank draft (quantity defaults to 1).
    pub fn empty() -> Self {
        LineDraft {
            barcode: String::new(),
            name: String::new(),
            price: None,
            quantity: 1,
        }
    }

    /// A draft holding only the barcode of an unknown product.
    pub fn for_barcode(barcode: impl Into<String>) -> Self {
        LineDraft {
            barcode: barcode.into(),
            ..LineDraft::empty()
        }
    }

    /// Returns true if nothing has been entered.
    pub fn is_blank(&self) -> bool {
        self.barcode.is_empty() && self.name.is_empty() && self.price.is_none()
    }
}

impl Default for LineDraft {
    fn default() -> Self {
        LineDraft::empty()
    }
}

impl From<&Product> for LineDraft {
    fn from(product: &Product) -> Self {
        LineDraft {
            barcode: product.barcode.clone(),
            name: product.name.clone(),
            price: Some(product.price),
            quantity: 1,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
