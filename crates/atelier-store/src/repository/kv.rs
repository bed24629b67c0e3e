//! # Key/Value Repository
//!
//! One JSON document per key in the `client_storage` table.
//!
//! ## Write Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  put("cart-storage", doc)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT ... ON CONFLICT(key) DO UPDATE SET value = excluded.value      │
//! │                                                                         │
//! │  • The whole document is replaced, never merged                        │
//! │  • Last writer wins                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// A stored document.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct StorageEntry {
    pub key: String,
    pub value: String,
    pub updated_at: DateTime<Utc>,
}

/// Repository for key/value documents.
#[derive(Debug, Clone)]
pub struct KvRepository {
    pool: SqlitePool,
}

impl KvRepository {
    /// Creates a new KvRepository.
    pub fn new(pool: SqlitePool) -> Self {
        KvRepository { pool }
    }

    /// Gets the document stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(entry))` - Document found
    /// * `Ok(None)` - Nothing stored under this key
    pub async fn get(&self, key: &str) -> StoreResult<Option<StorageEntry>> {
        let entry = sqlx::query_as::<_, StorageEntry>(
            r#"
            SELECT key, value, updated_at
            FROM client_storage
            WHERE key = ?1
            "#,
        )
        .bind(key)
        .fetch_optional(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Stores `value` under `key`, replacing whatever was there.
    pub async fn put(&self, key: &str, value: &str) -> StoreResult<()> {
        let now = Utc::now();

        debug!(key = %key, bytes = value.len(), "Writing client storage entry");

        sqlx::query(
            r#"
            INSERT INTO client_storage (key, value, updated_at)
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

        Ok(())
    }

    /// Removes the document under `key`. Returns whether one existed.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM client_storage WHERE key = ?1")
            .bind(key)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Lists all stored keys, sorted.
    pub async fn keys(&self) -> StoreResult<Vec<String>> {
        let keys = sqlx::query_scalar::<_, String>("SELECT key FROM client_storage ORDER BY key")
            .fetch_all(&self.pool)
            .await?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn repo() -> KvRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().kv()
    }

    #[tokio::test]
    async fn test_get_missing_key() {
        let kv = repo().await;
        assert!(kv.get("cart-storage").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_then_get() {
        let kv = repo().await;
        kv.put("cart-storage", r#"{"state":{},"version":0}"#).await.unwrap();

        let entry = kv.get("cart-storage").await.unwrap().unwrap();
        assert_eq!(entry.key, "cart-storage");
        assert_eq!(entry.value, r#"{"state":{},"version":0}"#);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let kv = repo().await;
        kv.put("cart-storage", "first").await.unwrap();
        kv.put("cart-storage", "second").await.unwrap();

        let entry = kv.get("cart-storage").await.unwrap().unwrap();
        assert_eq!(entry.value, "second");
        assert_eq!(kv.keys().await.unwrap(), vec!["cart-storage".to_string()]);
    }

    #[tokio::test]
    async fn test_remove() {
        let kv = repo().await;
        kv.put("a", "1").await.unwrap();
        kv.put("b", "2").await.unwrap();

        assert!(kv.remove("a").await.unwrap());
        assert!(!kv.remove("a").await.unwrap());
        assert_eq!(kv.keys().await.unwrap(), vec!["b".to_string()]);
    }
}
