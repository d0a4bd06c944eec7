//! # Cart Ledger
//!
//! The in-memory, ordered collection of cart lines.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Ledger Operations                                    │
//! │                                                                         │
//! │  add(draft)            barcode already present?                         │
//! │                          YES → quantity := draft.quantity (REPLACE)     │
//! │                          NO  → append line with fresh LineId            │
//! │                        invalid draft → ValidationError, no change       │
//! │                                                                         │
//! │  set_quantity(id, n)   n outside 1..=999 → no-op; else quantity := n    │
//! │  increment / decrement +1 / -1 through set_quantity                     │
//! │  remove(id)            delete; absent id → no-op                        │
//! │  clear()               drop all lines                                   │
//! │                                                                         │
//! │  total_items()  = Σ quantity        (computed on every read)           │
//! │  total_price()  = Σ price × qty     (computed on every read)           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The ledger is pure. Persisting it after each mutation is the caller's
//! job; every mutating method reports whether anything changed so the
//! caller knows when a snapshot write is due.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{CartLine, LineDraft, LineId};
use crate::validation::{validate_draft, validate_quantity};

/// What `CartLedger::add` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AddOutcome {
    /// A new line was appended.
    Appended { id: LineId },

    /// The existing line for the barcode had its quantity replaced.
    QuantityReplaced {
        id: LineId,
        previous: i64,
        quantity: i64,
    },
}

impl AddOutcome {
    /// The id of the line that was touched.
    pub fn id(&self) -> LineId {
        match self {
            AddOutcome::Appended { id } | AddOutcome::QuantityReplaced { id, .. } => *id,
        }
    }
}

/// Aggregate view of the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    /// Number of distinct lines.
    pub line_count: usize,

    /// Sum of quantities.
    pub item_count: i64,

    /// Sum of price × quantity.
    pub total: Money,
}

/// Ordered cart lines; insertion order is display order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLedger {
    lines: Vec<CartLine>,
}

impl CartLedger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        CartLedger { lines: Vec::new() }
    }

    /// Rebuilds a ledger from snapshot lines.
    ///
    /// Lines that break the ledger invariants (quantity outside
    /// `1..=MAX_ITEM_QUANTITY`, negative price, a barcode seen earlier in the
    /// list) are dropped.
    pub fn from_lines(lines: Vec<CartLine>) -> Self {
        let mut ledger = CartLedger::new();
        for line in lines {
            if validate_quantity(line.quantity).is_err()
                || line.price.is_negative()
                || ledger.find_by_barcode(&line.barcode).is_some()
            {
                debug!(barcode = %line.barcode, quantity = line.quantity, "Dropping invalid snapshot line");
                continue;
            }
            ledger.lines.push(line);
        }
        ledger
    }

    /// All lines in display order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up a line by id.
    pub fn get(&self, id: LineId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id == id)
    }

    /// Looks up a line by barcode.
    pub fn find_by_barcode(&self, barcode: &str) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.barcode == barcode)
    }

    /// Returns the id of the line at a 1-based display position.
    pub fn id_at(&self, position: usize) -> Option<LineId> {
        position
            .checked_sub(1)
            .and_then(|index| self.lines.get(index))
            .map(|line| line.id)
    }

    /// Adds a draft to the cart.
    ///
    /// ## Behavior
    /// - Barcode already in the cart: its quantity is REPLACED by the draft's
    ///   quantity (a repeat add never sums)
    /// - Otherwise a new line is appended with a fresh id
    ///
    /// ## Errors
    /// Missing barcode, name or price, a negative price, or quantity < 1.
    /// The ledger is untouched on error.
    pub fn add(&mut self, draft: &LineDraft) -> Result<AddOutcome, ValidationError> {
        let valid = validate_draft(draft)?;

        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|line| line.barcode == valid.barcode)
        {
            let previous = line.quantity;
            line.quantity = valid.quantity;
            debug!(barcode = %line.barcode, previous, quantity = valid.quantity, "Cart line quantity replaced");
            return Ok(AddOutcome::QuantityReplaced {
                id: line.id,
                previous,
                quantity: valid.quantity,
            });
        }

        let id = LineId::generate();
        debug!(barcode = %valid.barcode, %id, "Cart line appended");
        self.lines.push(CartLine {
            id,
            barcode: valid.barcode,
            name: valid.name,
            price: valid.price,
            quantity: valid.quantity,
        });

        Ok(AddOutcome::Appended { id })
    }

    /// Overwrites the quantity of a line.
    ///
    /// Returns false (no-op) when `quantity` is outside
    /// `1..=MAX_ITEM_QUANTITY`, the id is unknown, or the quantity is
    /// unchanged.
    pub fn set_quantity(&mut self, id: LineId, quantity: i64) -> bool {
        if validate_quantity(quantity).is_err() {
            debug!(%id, quantity, "Quantity out of range, ignored");
            return false;
        }

        match self.lines.iter_mut().find(|line| line.id == id) {
            Some(line) if line.quantity != quantity => {
                line.quantity = quantity;
                true
            }
            _ => false,
        }
    }

    /// Adds one to a line's quantity; a line at `MAX_ITEM_QUANTITY` stays
    /// there.
    pub fn increment(&mut self, id: LineId) -> bool {
        match self.get(id) {
            Some(line) => {
                let next = line.quantity.saturating_add(1);
                self.set_quantity(id, next)
            }
            None => false,
        }
    }

    /// Subtracts one from a line's quantity; a line at 1 stays at 1.
    pub fn decrement(&mut self, id: LineId) -> bool {
        match self.get(id) {
            Some(line) => {
                let next = line.quantity - 1;
                self.set_quantity(id, next)
            }
            None => false,
        }
    }

    /// Removes a line. Returns the removed line, or `None` if absent.
    pub fn remove(&mut self, id: LineId) -> Option<CartLine> {
        let index = self.lines.iter().position(|line| line.id == id)?;
        Some(self.lines.remove(index))
    }

    /// Removes every line. Returns true if the cart was not empty.
    pub fn clear(&mut self) -> bool {
        let had_lines = !self.lines.is_empty();
        self.lines.clear();
        had_lines
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// All aggregates at once.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            line_count: self.line_count(),
            item_count: self.total_items(),
            total: self.total_price(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
