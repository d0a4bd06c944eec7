//! # Station State
//!
//! State owned by the event loop.
//!
//! ## State Types
//! - [`cart::PersistentCart`] - Cart ledger with write-through snapshots
//!
//! The session is the only writer. Everything runs on one task, so no
//! locking is needed.

pub mod cart;

pub use cart::{CheckoutReport, PersistentCart, WriteThrough};
