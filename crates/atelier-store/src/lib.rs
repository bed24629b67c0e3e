//! # atelier-store: Client-Side Storage for the Atelier Storefront
//!
//! This crate is where the cart survives between sessions. It plays the part
//! browser storage plays for a web storefront: one JSON document per key,
//! overwritten wholesale on every save.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Cart Persistence Flow                            │
//! │                                                                         │
//! │  CartState mutation (add / update / remove / clear)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   atelier-store (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │ SnapshotStore │    │  KvRepository │    │  Migrations  │  │   │
//! │  │   │ (snapshot.rs) │    │   (kv.rs)     │    │  (embedded)  │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ {state,       │───►│ get / put     │    │ 001_client_  │  │   │
//! │  │   │  version}     │    │ remove / keys │    │   storage    │  │   │
//! │  │   │ Sqlite|Memory │    │               │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   ~/.local/share/atelier-storefront/storefront.db              │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Storage error types
//! - [`repository`] - The key/value repository
//! - [`snapshot`] - Versioned snapshot store (SQLite or in-memory)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use atelier_store::{Database, DbConfig, SnapshotStore};
//!
//! let db = Database::new(DbConfig::new("path/to/storefront.db")).await?;
//! let store = SnapshotStore::sqlite(&db);
//!
//! store.save("cart-storage", 0, &snapshot).await?;
//! let restored: Option<CartSnapshot> = store.load("cart-storage", 0).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod snapshot;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};
pub use repository::kv::{KvRepository, StorageEntry};
pub use snapshot::{Persisted, SnapshotStore};
