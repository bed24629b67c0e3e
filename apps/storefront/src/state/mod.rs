//! # State Module
//!
//! Manages application state for the storefront shell.
//!
//! ## Why Multiple State Types?
//! Instead of a single struct containing everything, each concern has its
//! own state type and each command takes only the states it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      Storefront (lib.rs)                        │   │
//! │  │  built once at startup by Storefront::bootstrap                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                              │                                          │
//! │          ┌──────────────────┼──────────────────┐                       │
//! │          ▼                  ▼                  ▼                        │
//! │  ┌──────────────┐  ┌──────────────┐  ┌──────────────────┐              │
//! │  │  CartState   │  │PaymentsState │  │   ConfigState    │              │
//! │  │              │  │              │  │                  │              │
//! │  │  Mutex<Cart> │  │ MockProcessor│  │  store_name      │              │
//! │  │  + snapshot  │  │              │  │  currency        │              │
//! │  │    store     │  │              │  │  latency, paths  │              │
//! │  └──────────────┘  └──────────────┘  └──────────────────┘              │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState: tokio Mutex, held across each snapshot save              │
//! │  • PaymentsState: stateless processor, shared freely                   │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod cart;
mod config;
mod payments;

pub use cart::{CartResponse, CartState, CartTotals, CheckoutGuard};
pub use config::{ConfigError, ConfigState, CONFIG_FILE_NAME, DATABASE_FILE_NAME};
pub use payments::PaymentsState;
