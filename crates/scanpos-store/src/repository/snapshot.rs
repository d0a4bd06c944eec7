//! # Snapshot Repository
//!
//! Keyed, whole-value snapshots. The station stores the serialized cart under
//! a single key and rewrites it after every mutation.
//!
//! ## Write-Through Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Snapshot Lifecycle                                   │
//! │                                                                         │
//! │  startup        get("cart_items")  ──► hydrate ledger (or empty)       │
//! │                                                                         │
//! │  add / qty /    put("cart_items", <full cart JSON>)                    │
//! │  remove           INSERT ... ON CONFLICT(key) DO UPDATE                │
//! │                                                                         │
//! │  clear /        delete("cart_items")                                   │
//! │  checkout                                                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every `put` replaces the whole value. There is no partial update, so a
//! reader never sees half of a cart.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::DbResult;

/// A stored snapshot row.
#[derive(Debug, Clone, PartialEq, Eq, FromRow)]
pub struct Snapshot {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Store Seam
// =============================================================================

/// Persistence seam for snapshot consumers.
///
/// The cart only needs load/save/erase. Taking the trait instead of the
/// concrete repository lets session tests count writes or inject failures.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    /// Returns the stored value for `key`, if any.
    async fn load(&self, key: &str) -> DbResult<Option<String>>;

    /// Replaces the stored value for `key`.
    async fn save(&self, key: &str, value: &str) -> DbResult<()>;

    /// Removes `key`. Erasing a missing key is not an error.
    async fn erase(&self, key: &str) -> DbResult<()>;
}

// =============================================================================
// SQLite Repository
// =============================================================================

/// Repository for snapshot rows.
#[derive(Debug, Clone)]
pub struct SnapshotRepository {
    pool: SqlitePool,
}

impl SnapshotRepository {
    /// Creates a new SnapshotRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SnapshotRepository { pool }
    }

    /// Gets the snapshot stored under `key`.
    pub async fn get(&self, key: &str) -> DbResult<Option<Snapshot>> {
        let snapshot = sqlx::query_as::<_, Snapshot>(
            r#"
            SELECT key, value, updated_at
            FROM snapshots
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(snapshot)
    }

    /// Inserts or replaces the snapshot stored under `key`.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let json = serde_json::to_string(&cart)?;
    /// repo.put("cart_items", &json).await?;
    /// ```
    pub async fn put(&self, key: &str, value: &str) -> DbResult<Snapshot> {
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Writing snapshot");

        sqlx::query(
            r#"
            INSERT INTO snapshots (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(Snapshot {
            key: key.to_string(),
            value: value.to_string(),
            updated_at: now,
        })
    }

    /// Deletes the snapshot stored under `key`.
    ///
    /// Returns true if a row was removed.
    pub async fn delete(&self, key: &str) -> DbResult<bool> {
        let result = sqlx::query("DELETE FROM snapshots WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        debug!(key = %key, removed = result.rows_affected(), "Deleted snapshot");
        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl SnapshotStore for SnapshotRepository {
    async fn load(&self, key: &str) -> DbResult<Option<String>> {
        Ok(self.get(key).await?.map(|s| s.value))
    }

    async fn save(&self, key: &str, value: &str) -> DbResult<()> {
        self.put(key, value).await.map(|_| ())
    }

    async fn erase(&self, key: &str) -> DbResult<()> {
        self.delete(key).await.map(|_| ())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> (Database, SnapshotRepository) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.snapshots();
        (db, repo)
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let (_db, repo) = repo().await;
        assert!(repo.get("cart_items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let (_db, repo) = repo().await;

        repo.put("cart_items", "[]").await.unwrap();
        let snapshot = repo.get("cart_items").await.unwrap().unwrap();

        assert_eq!(snapshot.key, "cart_items");
        assert_eq!(snapshot.value, "[]");
    }

    #[tokio::test]
    async fn test_put_replaces_whole_value() {
        let (db, repo) = repo().await;

        repo.put("cart_items", r#"[{"a":1}]"#).await.unwrap();
        repo.put("cart_items", "[]").await.unwrap();

        assert_eq!(repo.load("cart_items").await.unwrap().as_deref(), Some("[]"));
        let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM snapshots")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(rows, 1);
    }

    #[tokio::test]
    async fn test_delete() {
        let (_db, repo) = repo().await;

        repo.put("cart_items", "[]").await.unwrap();
        assert!(repo.delete("cart_items").await.unwrap());
        assert!(!repo.delete("cart_items").await.unwrap());
        assert!(repo.get("cart_items").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_trait_erase_missing_is_ok() {
        let (_db, repo) = repo().await;
        let store: &dyn SnapshotStore = &repo;

        store.erase("nothing-here").await.unwrap();
        store.save("k", "v").await.unwrap();
        assert_eq!(store.load("k").await.unwrap().as_deref(), Some("v"));
    }

    #[tokio::test]
    async fn test_snapshot_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scanpos.db");

        {
            let db = Database::new(DbConfig::new(&path)).await.unwrap();
            db.snapshots().put("cart_items", "[1,2,3]").await.unwrap();
            db.close().await;
        }

        let db = Database::new(DbConfig::new(&path)).await.unwrap();
        let value = db.snapshots().load("cart_items").await.unwrap();
        assert_eq!(value.as_deref(), Some("[1,2,3]"));
        db.close().await;
    }
}
