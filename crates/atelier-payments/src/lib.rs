//! # atelier-payments: Simulated Card Processor
//!
//! Authorizes checkout payments without contacting any real processor.
//!
//! ## Authorization Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     MockProcessor::authorize                            │
//! │                                                                         │
//! │  PaymentRequest                                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sleep(latency) ─────────────── default 1500 ms, instant() in tests     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  number empty / < 15 chars? ──► "Invalid card number"                   │
//! │  expiry empty / no '/'?     ──► "Invalid expiry date"                   │
//! │  cvv empty / < 3 chars?     ──► "Invalid CVV"                           │
//! │  number ends in "0000"?     ──► "Card declined. Please use a ..."       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  { success: true, transactionId: "txn_<32 hex>" }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every outcome is a [`PaymentResponse`](atelier_core::PaymentResponse)
//! value. Nothing here returns `Err` to the caller.
//!
//! ## Cancellation
//! `authorize` is an ordinary future. Dropping it before it resolves
//! abandons the authorization; nothing is left running in the background.
//!
//! ## Usage
//! ```rust,ignore
//! use atelier_payments::{MockProcessor, ProcessorConfig};
//!
//! let processor = MockProcessor::new(ProcessorConfig::default());
//! let response = processor.authorize(&request).await;
//! if response.success {
//!     println!("Approved: {}", response.transaction_id.unwrap_or_default());
//! }
//! ```

pub mod config;
pub mod error;
pub mod processor;

pub use config::ProcessorConfig;
pub use error::PaymentError;
pub use processor::{check_request, MockProcessor};

/// Card numbers ending in this suffix are always declined.
pub const DECLINE_SUFFIX: &str = "0000";

/// Prefix of every generated transaction id.
pub const TRANSACTION_ID_PREFIX: &str = "txn_";
