//! # Cart State
//!
//! The cart ledger plus its write-through snapshot.
//!
//! ## Write-Through Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  Operation          Ledger Change               Snapshot                │
//! │  ─────────          ─────────────               ────────                │
//! │                                                                         │
//! │  add ─────────────► append / replace qty ─────► put(full cart JSON)    │
//! │  set / inc / dec ─► overwrite qty (if changed) ► put(full cart JSON)    │
//! │  remove ──────────► drop line (if present) ───► put(full cart JSON)    │
//! │  clear ───────────► empty ────────────────────► delete(key)            │
//! │  checkout ────────► totals, then empty ───────► delete(key)            │
//! │                                                                         │
//! │  NOTE: A failed write never rolls the ledger back. The change stays    │
//! │        in memory and the error is handed to the caller to display.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{debug, info, warn};

use scanpos_core::{AddOutcome, CartLedger, CartLine, CartTotals, LineDraft, LineId, Money};
use scanpos_store::SnapshotStore;

use crate::error::{AppError, AppResult};

/// A mutation result plus the outcome of its snapshot write.
#[derive(Debug)]
pub struct WriteThrough<T> {
    /// What the ledger did.
    pub value: T,

    /// Set when the ledger changed but the snapshot could not be written.
    pub save_error: Option<AppError>,
}

impl<T> WriteThrough<T> {
    fn unsaved(value: T) -> Self {
        WriteThrough {
            value,
            save_error: None,
        }
    }
}

/// Summary of a completed order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutReport {
    pub line_count: usize,
    pub item_count: i64,
    pub total: Money,
    pub completed_at: DateTime<Utc>,
}

/// Cart ledger backed by a snapshot store.
pub struct PersistentCart {
    ledger: CartLedger,
    store: Arc<dyn SnapshotStore>,
    key: String,
}

impl PersistentCart {
    /// Restores the cart from its snapshot.
    ///
    /// A missing snapshot gives an empty cart. So does a corrupt one: the
    /// damage is logged and the next mutation overwrites it.
    pub async fn hydrate(store: Arc<dyn SnapshotStore>, key: impl Into<String>) -> AppResult<Self> {
        let key = key.into();

        let ledger = match store.load(&key).await? {
            None => {
                debug!(key = %key, "No cart snapshot, starting empty");
                CartLedger::new()
            }
            Some(json) => match serde_json::from_str::<Vec<CartLine>>(&json) {
                Ok(lines) => {
                    let ledger = CartLedger::from_lines(lines);
                    info!(key = %key, lines = ledger.line_count(), "Cart restored from snapshot");
                    ledger
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "Cart snapshot is corrupt, starting empty");
                    CartLedger::new()
                }
            },
        };

        Ok(PersistentCart { ledger, store, key })
    }

    /// Read-only view of the ledger.
    pub fn ledger(&self) -> &CartLedger {
        &self.ledger
    }

    /// Aggregates.
    pub fn totals(&self) -> CartTotals {
        self.ledger.totals()
    }

    /// Resolves a 1-based display position to a line id.
    pub fn line_at(&self, position: usize) -> AppResult<LineId> {
        self.ledger
            .id_at(position)
            .ok_or_else(|| AppError::not_found("Cart line", &position.to_string()))
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Adds a draft. Validation failures leave the cart and snapshot alone.
    pub async fn add(&mut self, draft: &LineDraft) -> AppResult<WriteThrough<AddOutcome>> {
        let outcome = self.ledger.add(draft)?;
        Ok(self.save(outcome).await)
    }

    /// Overwrites a quantity. Writes only if the quantity actually changed.
    pub async fn set_quantity(&mut self, id: LineId, quantity: i64) -> WriteThrough<bool> {
        let changed = self.ledger.set_quantity(id, quantity);
        self.save_if(changed).await
    }

    pub async fn increment(&mut self, id: LineId) -> WriteThrough<bool> {
        let changed = self.ledger.increment(id);
        self.save_if(changed).await
    }

    pub async fn decrement(&mut self, id: LineId) -> WriteThrough<bool> {
        let changed = self.ledger.decrement(id);
        self.save_if(changed).await
    }

    /// Removes a line. Absent ids are a no-op and skip the write.
    pub async fn remove(&mut self, id: LineId) -> WriteThrough<Option<CartLine>> {
        match self.ledger.remove(id) {
            Some(line) => self.save(Some(line)).await,
            None => WriteThrough::unsaved(None),
        }
    }

    /// Empties the cart and erases its snapshot.
    pub async fn clear(&mut self) -> WriteThrough<bool> {
        let had_lines = self.ledger.clear();
        self.erase(had_lines).await
    }

    /// Completes the order: reports totals, then clears like [`clear`](Self::clear).
    pub async fn checkout(&mut self) -> AppResult<WriteThrough<CheckoutReport>> {
        if self.ledger.is_empty() {
            return Err(AppError::validation("Cart is empty"));
        }

        let totals = self.ledger.totals();
        let report = CheckoutReport {
            line_count: totals.line_count,
            item_count: totals.item_count,
            total: totals.total,
            completed_at: Utc::now(),
        };
        info!(items = report.item_count, total = %report.total, "Order completed");

        self.ledger.clear();
        Ok(self.erase(report).await)
    }

    // =========================================================================
    // Snapshot Writes
    // =========================================================================

    async fn save_if(&mut self, changed: bool) -> WriteThrough<bool> {
        if changed {
            self.save(true).await
        } else {
            WriteThrough::unsaved(false)
        }
    }

    async fn save<T>(&self, value: T) -> WriteThrough<T> {
        let save_error = match self.write_snapshot().await {
            Ok(()) => None,
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart snapshot write failed");
                Some(e)
            }
        };
        WriteThrough { value, save_error }
    }

    async fn write_snapshot(&self) -> AppResult<()> {
        let json = serde_json::to_string(&self.ledger)
            .map_err(|e| AppError::internal(format!("Cart serialization failed: {}", e)))?;
        self.store.save(&self.key, &json).await?;
        debug!(key = %self.key, lines = self.ledger.line_count(), "Cart snapshot written");
        Ok(())
    }

    async fn erase<T>(&self, value: T) -> WriteThrough<T> {
        let save_error = match self.store.erase(&self.key).await {
            Ok(()) => {
                debug!(key = %self.key, "Cart snapshot erased");
                None
            }
            Err(e) => {
                warn!(key = %self.key, error = %e, "Cart snapshot erase failed");
                Some(AppError::from(e))
            }
        };
        WriteThrough { value, save_error }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use scanpos_store::{Database, DbConfig, DbError, DbResult};

    const KEY: &str = "cart_items";

    async fn store() -> (Database, Arc<dyn SnapshotStore>) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store: Arc<dyn SnapshotStore> = Arc::new(db.snapshots());
        (db, store)
    }

    fn water(quantity: i64) -> LineDraft {
        LineDraft {
            barcode: "123".to_string(),
            name: "Water".to_string(),
            price: Some(Money::from_cents(150)),
            quantity,
        }
    }

    /// Accepts reads, fails every write.
    struct ReadOnlyStore;

    #[async_trait]
    impl SnapshotStore for ReadOnlyStore {
        async fn load(&self, _key: &str) -> DbResult<Option<String>> {
            Ok(None)
        }

        async fn save(&self, _key: &str, _value: &str) -> DbResult<()> {
            Err(DbError::QueryFailed("attempt to write a readonly database".into()))
        }

        async fn erase(&self, _key: &str) -> DbResult<()> {
            Err(DbError::QueryFailed("attempt to write a readonly database".into()))
        }
    }

    #[tokio::test]
    async fn test_hydrate_empty() {
        let (_db, store) = store().await;
        let cart = PersistentCart::hydrate(store, KEY).await.unwrap();
        assert!(cart.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_add_survives_rehydrate() {
        let (_db, store) = store().await;

        let mut cart = PersistentCart::hydrate(store.clone(), KEY).await.unwrap();
        let result = cart.add(&water(3)).await.unwrap();
        assert!(result.save_error.is_none());

        let restored = PersistentCart::hydrate(store, KEY).await.unwrap();
        assert_eq!(restored.ledger(), cart.ledger());
        assert_eq!(restored.totals().total, Money::from_cents(450));
    }

    #[tokio::test]
    async fn test_invalid_add_does_not_write() {
        let (_db, store) = store().await;
        let mut cart = PersistentCart::hydrate(store.clone(), KEY).await.unwrap();

        let mut draft = water(1);
        draft.name.clear();
        assert!(cart.add(&draft).await.is_err());
        assert!(store.load(KEY).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clear_erases_snapshot() {
        let (_db, store) = store().await;
        let mut cart = PersistentCart::hydrate(store.clone(), KEY).await.unwrap();

        cart.add(&water(2)).await.unwrap();
        assert!(store.load(KEY).await.unwrap().is_some());

        let result = cart.clear().await;
        assert!(result.value);
        assert!(store.load(KEY).await.unwrap().is_none());

        let fresh = PersistentCart::hydrate(store, KEY).await.unwrap();
        assert!(fresh.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_checkout_reports_then_clears() {
        let (_db, store) = store().await;
        let mut cart = PersistentCart::hydrate(store.clone(), KEY).await.unwrap();

        cart.add(&water(3)).await.unwrap();
        let report = cart.checkout().await.unwrap().value;

        assert_eq!(report.item_count, 3);
        assert_eq!(report.total, Money::from_cents(450));
        assert!(cart.ledger().is_empty());
        assert!(store.load(KEY).await.unwrap().is_none());

        assert!(cart.checkout().await.is_err());
    }

    #[tokio::test]
    async fn test_quantity_edits() {
        let (_db, store) = store().await;
        let mut cart = PersistentCart::hydrate(store.clone(), KEY).await.unwrap();

        cart.add(&water(1)).await.unwrap();
        let id = cart.line_at(1).unwrap();

        assert!(!cart.set_quantity(id, 0).await.value);
        assert!(!cart.set_quantity(id, -4).await.value);
        assert!(!cart.decrement(id).await.value);
        assert!(cart.increment(id).await.value);
        assert!(cart.set_quantity(id, 5).await.value);

        let restored = PersistentCart::hydrate(store, KEY).await.unwrap();
        assert_eq!(restored.ledger().lines()[0].quantity, 5);
        assert!(cart.line_at(2).is_err());
    }

    #[tokio::test]
    async fn test_remove_unknown_is_noop() {
        let (_db, store) = store().await;
        let mut cart = PersistentCart::hydrate(store, KEY).await.unwrap();

        let result = cart.remove(LineId::generate()).await;
        assert!(result.value.is_none());
        assert!(result.save_error.is_none());
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_starts_empty() {
        let (_db, store) = store().await;
        store.save(KEY, "{not json").await.unwrap();

        let cart = PersistentCart::hydrate(store, KEY).await.unwrap();
        assert!(cart.ledger().is_empty());
    }

    #[tokio::test]
    async fn test_failed_write_keeps_mutation() {
        let store: Arc<dyn SnapshotStore> = Arc::new(ReadOnlyStore);
        let mut cart = PersistentCart::hydrate(store, KEY).await.unwrap();

        let result = cart.add(&water(2)).await.unwrap();
        assert!(result.save_error.is_some());
        assert_eq!(cart.totals().item_count, 2);

        let cleared = cart.clear().await;
        assert!(cleared.save_error.is_some());
        assert!(cart.ledger().is_empty());
    }
}
