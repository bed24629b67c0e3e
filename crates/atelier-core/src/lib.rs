//! # atelier-core: Pure Business Logic for the Atelier Storefront
//!
//! This crate holds the storefront logic that has real rules behind it:
//! the shopping cart and the card checks used at checkout. Everything here
//! is a pure function or a plain value type.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Atelier Storefront Architecture                     │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Storefront UI (out of scope)                 │   │
//! │  │    Catalog ──► Cart drawer ──► Checkout form ──► Confirmation  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ invoke (JSON lines)                    │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront commands                          │   │
//! │  │    add_to_cart, update_cart_item, inspect_card, checkout, ...   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ atelier-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   card    │  │   │
//! │  │   │ CartItem  │  │   Money   │  │   Cart    │  │   Luhn    │  │   │
//! │  │   │ Payment*  │  │           │  │ Snapshot  │  │  Issuer   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │        atelier-store (snapshot)  •  atelier-payments (mock)     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Line items, payment request/response shapes
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`cart`] - The cart: line identity, merge-on-add, derived totals
//! - [`card`] - Card number checksum, display formatting, issuer lookup
//! - [`error`] - Domain error types
//! - [`validation`] - Checkout form validation
//!
//! ## Example Usage
//!
//! ```rust
//! use atelier_core::cart::Cart;
//! use atelier_core::money::Money;
//! use atelier_core::types::NewCartItem;
//!
//! let mut cart = Cart::new();
//! let ring = NewCartItem::new("ring-01", "ring-01-silver-7", "Hammered Band", Money::from_cents(4800))
//!     .with_attribute("material", "silver")
//!     .with_quantity(2);
//!
//! cart.add_item(ring.clone());
//! cart.add_item(ring);
//!
//! assert_eq!(cart.line_count(), 1);
//! assert_eq!(cart.item_count(), 4);
//! assert_eq!(cart.subtotal().cents(), 19200);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod card;
pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use atelier_core::Money` instead of
// `use atelier_core::money::Money`

pub use card::{CardIssuer, CardValidationResult};
pub use cart::{Cart, CartSnapshot};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Storage key the cart snapshot is persisted under.
///
/// The storefront UI historically kept its cart under this name in browser
/// storage; keeping the same key lets an exported snapshot be dropped in as-is.
pub const CART_STORAGE_KEY: &str = "cart-storage";

/// Version stamped on persisted cart snapshots.
///
/// Bump when the snapshot shape changes. Snapshots with another version are
/// discarded on load rather than migrated.
pub const CART_STORAGE_VERSION: u32 = 0;

/// Fewest digits a card number may have to pass the checksum validator.
pub const MIN_CARD_DIGITS: usize = 13;

/// Most digits a card number may have to pass the checksum validator.
pub const MAX_CARD_DIGITS: usize = 19;
