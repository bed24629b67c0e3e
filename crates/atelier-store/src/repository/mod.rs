//! # Repository Module
//!
//! Database repository implementations for client storage.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  SnapshotStore                                                         │
//! │       │                                                                 │
//! │       │  db.kv().put("cart-storage", json)                             │
//! │       ▼                                                                 │
//! │  KvRepository                                                          │
//! │  ├── get(&self, key)                                                   │
//! │  ├── put(&self, key, value)                                            │
//! │  ├── remove(&self, key)                                                │
//! │  └── keys(&self)                                                       │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (client_storage table)                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`kv::KvRepository`] - Key/value documents

pub mod kv;
