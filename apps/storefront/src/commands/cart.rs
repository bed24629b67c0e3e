//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │ Confirmed│       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add_to_cart        checkout             │             │
//! │       │           update_cart_item   (checkout.rs)        │             │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       │                ▼                                  │             │
//! │       └──────────  clear_cart  ◄──────────────────────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Cart commands never fail. Unknown line ids are no-ops, and a failed
//! snapshot save only costs persistence, not the mutation.

use tracing::debug;

use atelier_core::NewCartItem;

use crate::state::{CartResponse, CartState};

/// Gets the current cart contents.
///
/// ## Returns
/// `{ items: [...], totals: { subtotal, itemCount, lineCount } }`
pub async fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.snapshot().await
}

/// Adds a candidate line to the cart.
///
/// ## Behavior
/// - Same product, variant and attributes as an existing line: that line's
///   quantity grows, its price and name stay as first added
/// - Otherwise: a new line with a fresh id is appended
/// - Quantity 0: ignored
pub async fn add_to_cart(cart: &CartState, item: NewCartItem) -> CartResponse {
    debug!(
        product_id = %item.product_id,
        variant_id = %item.variant_id,
        quantity = item.quantity,
        "add_to_cart command"
    );

    cart.with_cart_mut(|c| {
        c.add_item(item);
        CartResponse::from(&*c)
    })
    .await
}

/// Sets the quantity of a line.
///
/// ## Behavior
/// - Quantity ≤ 0: removes the line
/// - Unknown line id: no change
pub async fn update_cart_item(cart: &CartState, line_id: &str, quantity: i64) -> CartResponse {
    debug!(line_id = %line_id, quantity = quantity, "update_cart_item command");

    cart.with_cart_mut(|c| {
        if !c.update_item_quantity(line_id, quantity) {
            debug!(line_id = %line_id, "No such cart line");
        }
        CartResponse::from(&*c)
    })
    .await
}

/// Removes a line from the cart. Unknown ids are ignored.
pub async fn remove_from_cart(cart: &CartState, line_id: &str) -> CartResponse {
    debug!(line_id = %line_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        c.remove_item(line_id);
        CartResponse::from(&*c)
    })
    .await
}

/// Clears all items from the cart.
pub async fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");

    cart.with_cart_mut(|c| {
        c.clear();
        CartResponse::from(&*c)
    })
    .await
}
