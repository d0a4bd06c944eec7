//! # scanpos-core: Pure Logic for ScanPOS
//!
//! This crate is the **heart** of the scanning station. It contains the
//! scan debounce gate and the cart ledger as pure state machines with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ScanPOS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 scanpos-cli (event loop)                        │   │
//! │  │   decoder lines ──► gate ──► lookup ──► ledger ──► snapshot     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ scanpos-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ debounce  │  │   cart    │  │   │
//! │  │   │ ScanEvent │  │   Money   │  │ ScanDe-   │  │ CartLedger│  │   │
//! │  │   │ CartLine  │  │           │  │ bouncer   │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO CLOCK • NO NETWORK • PURE FUNCTIONS              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (ScanEvent, Product, CartLine, LineDraft)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`debounce`] - Scan debounce gate
//! - [`cart`] - Cart ledger with replace-on-repeat merge
//! - [`validation`] - Draft validation
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use scanpos_core::{CartLedger, LineDraft, Money};
//!
//! let mut cart = CartLedger::new();
//! let draft = LineDraft {
//!     barcode: "123".to_string(),
//!     name: "Water".to_string(),
//!     price: Some(Money::from_cents(150)),
//!     quantity: 3,
//! };
//! cart.add(&draft).unwrap();
//! assert_eq!(cart.total_price().to_string(), "4.50");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod debounce;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{AddOutcome, CartLedger, CartTotals};
pub use debounce::{GateState, RejectReason, ScanDebouncer, ScanDecision, DEFAULT_COOLDOWN};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Longest barcode accepted from a decoder or manual entry.
///
/// GS1 symbologies top out well below this; longer input is almost always
/// a scanner that missed its line terminator.
pub const MAX_BARCODE_LEN: usize = 64;

/// Largest quantity a single cart line may hold.
pub const MAX_ITEM_QUANTITY: i64 = 999;
