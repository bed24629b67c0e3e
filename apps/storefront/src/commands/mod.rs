//! # Commands Module
//!
//! All commands exposed to the storefront UI.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs       ◄─── You are here (exports)
//! ├── cart.rs      ◄─── Cart manipulation
//! ├── card.rs      ◄─── Card number feedback
//! ├── checkout.rs  ◄─── Payment and order confirmation
//! └── config.rs    ◄─── Configuration retrieval
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  UI                                                                     │
//! │  ──                                                                     │
//! │  {"command": "update_cart_item",                                        │
//! │   "args": {"lineId": "9f1c...", "quantity": 2}}                         │
//! │         │                                                               │
//! │         │ (one JSON line on stdin)                                      │
//! │         ▼                                                               │
//! │  invoke.rs                                                              │
//! │  ─────────                                                              │
//! │  decode args ──► commands::cart::update_cart_item(                      │
//! │                      &app.cart,      ◄── state it needs                 │
//! │                      line_id,        ◄── from args                      │
//! │                      quantity,                                          │
//! │                  ) -> CartResponse                                      │
//! │         │                                                               │
//! │         │ (one JSON line on stdout)                                     │
//! │         ▼                                                               │
//! │  {"ok": {"items": [...], "totals": {...}}}                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the cart
//! async fn get_cart(cart: &CartState) -> CartResponse
//!
//! // Needs cart, config and payments
//! async fn checkout(cart: &CartState, config: &ConfigState, payments: &PaymentsState, ...)
//! ```

pub mod card;
pub mod cart;
pub mod checkout;
pub mod config;
