//! # Snapshot Store
//!
//! Saves and restores whole-state snapshots under a fixed key.
//!
//! ## Stored Format
//! ```text
//! key:   "cart-storage"
//! value: {"state": { ...snapshot... }, "version": 0}
//! ```
//!
//! The envelope carries a version so that a snapshot written by an older
//! build with a different shape is dropped instead of half-decoded.
//!
//! ## Backends
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  SnapshotStore::Sqlite(KvRepository)   durable, survives restarts       │
//! │  SnapshotStore::Memory(map)            session only (fallback / tests)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{StoreError, StoreResult};
use crate::pool::Database;
use crate::repository::kv::KvRepository;

/// Versioned envelope around a stored state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persisted<T> {
    pub state: T,
    pub version: u32,
}

/// Where snapshots are kept.
#[derive(Debug, Clone)]
pub enum SnapshotStore {
    /// Durable storage in the SQLite `client_storage` table.
    Sqlite(KvRepository),
    /// In-process storage, lost when the process exits.
    Memory(Arc<Mutex<HashMap<String, String>>>),
}

impl SnapshotStore {
    /// Durable store backed by the given database.
    pub fn sqlite(db: &Database) -> Self {
        SnapshotStore::Sqlite(db.kv())
    }

    /// Session-only store.
    pub fn memory() -> Self {
        SnapshotStore::Memory(Arc::new(Mutex::new(HashMap::new())))
    }

    /// Whether snapshots outlive the process.
    pub fn is_durable(&self) -> bool {
        matches!(self, SnapshotStore::Sqlite(_))
    }

    /// Loads the state stored under `key`.
    ///
    /// ## Returns
    /// * `Ok(Some(state))` - A snapshot with the expected version
    /// * `Ok(None)` - Nothing stored, or stored with another version
    /// * `Err(StoreError::Serialization)` - Stored value is not decodable
    pub async fn load<T: DeserializeOwned>(&self, key: &str, version: u32) -> StoreResult<Option<T>> {
        let Some(raw) = self.read_raw(key).await? else {
            debug!(key = %key, "No snapshot stored");
            return Ok(None);
        };

        let envelope: Persisted<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|e| StoreError::serialization(key, e))?;

        if envelope.version != version {
            warn!(
                key = %key,
                stored = envelope.version,
                expected = version,
                "Discarding snapshot with unexpected version"
            );
            return Ok(None);
        }

        let state = serde_json::from_value(envelope.state)
            .map_err(|e| StoreError::serialization(key, e))?;

        Ok(Some(state))
    }

    /// Saves `state` under `key`, replacing any previous snapshot.
    pub async fn save<T: Serialize>(&self, key: &str, version: u32, state: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(&Persisted { state, version })
            .map_err(|e| StoreError::serialization(key, e))?;

        self.write_raw(key, raw).await
    }

    /// Removes the snapshot under `key`. Returns whether one existed.
    pub async fn remove(&self, key: &str) -> StoreResult<bool> {
        match self {
            SnapshotStore::Sqlite(kv) => kv.remove(key).await,
            SnapshotStore::Memory(map) => Ok(lock(map).remove(key).is_some()),
        }
    }

    async fn read_raw(&self, key: &str) -> StoreResult<Option<String>> {
        match self {
            SnapshotStore::Sqlite(kv) => Ok(kv.get(key).await?.map(|entry| entry.value)),
            SnapshotStore::Memory(map) => Ok(lock(map).get(key).cloned()),
        }
    }

    async fn write_raw(&self, key: &str, raw: String) -> StoreResult<()> {
        match self {
            SnapshotStore::Sqlite(kv) => kv.put(key, &raw).await,
            SnapshotStore::Memory(map) => {
                lock(map).insert(key.to_string(), raw);
                Ok(())
            }
        }
    }
}

// A panic while holding the map cannot leave a half-written String behind,
// so a poisoned lock is still safe to use.
fn lock(map: &Mutex<HashMap<String, String>>) -> std::sync::MutexGuard<'_, HashMap<String, String>> {
    map.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
