//! # Atelier Storefront Entry Point
//!
//! ## Application Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Atelier Storefront                               │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                      Storefront UI process                      │  │
//! │  │  • Product pages        • Cart drawer                           │  │
//! │  │  • Checkout form        • Order confirmation                    │  │
//! │  └──────────────────────────────┬───────────────────────────────────┘  │
//! │                                 │ JSON lines on stdin / stdout          │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                    Rust Backend (this crate)                     │  │
//! │  │                                                                  │  │
//! │  │  main.rs ────► starts the runtime                               │  │
//! │  │  lib.rs ─────► logging, config, state, invoke loop              │  │
//! │  │  commands/ ──► add_to_cart, inspect_card, checkout, ...         │  │
//! │  │  state/ ─────► CartState, ConfigState, PaymentsState            │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                 │                                       │
//! │                                 ▼                                       │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                         SQLite Database                          │  │
//! │  │  atelier.db (client_storage table, WAL mode)                     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    atelier_storefront::run().await
}
