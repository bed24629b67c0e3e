//! # Cart State
//!
//! Owns the shopper's cart and keeps its snapshot in client storage.
//!
//! ## Thread Safety
//! The cart sits behind a `tokio::sync::Mutex` because:
//! 1. Several commands may read or modify the cart
//! 2. Only one command should modify the cart at a time
//! 3. The lock is held across the snapshot save, so snapshots are written
//!    in the same order as the mutations that produced them
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                     Cart Mutation + Persistence                         │
//! │                                                                         │
//! │  add_to_cart / update_cart_item / remove_from_cart / clear_cart         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  lock cart ──► mutate (atelier_core::Cart) ──► totals recomputed        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SnapshotStore::save("cart-storage", 0, snapshot)                       │
//! │       │                                                                 │
//! │       ├── Ok  → done                                                    │
//! │       └── Err → warn!, cart keeps working in memory                     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  unlock, return CartResponse { items, totals }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, MutexGuard};
use tracing::{debug, info, warn};

use atelier_core::{Cart, CartItem, CartSnapshot, Money, CART_STORAGE_KEY, CART_STORAGE_VERSION};
use atelier_store::SnapshotStore;

/// Derived cart totals, as displayed next to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of `price * quantity` in minor units
    pub subtotal: Money,

    /// Sum of quantities
    pub item_count: u64,

    /// Number of distinct lines
    pub line_count: usize,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            subtotal: cart.subtotal(),
            item_count: cart.item_count(),
            line_count: cart.line_count(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Thread-safe cart container backed by a snapshot store.
#[derive(Debug)]
pub struct CartState {
    cart: Mutex<Cart>,
    store: SnapshotStore,
}

impl CartState {
    /// Creates an empty cart that lives for this session only.
    pub fn in_memory() -> Self {
        CartState {
            cart: Mutex::new(Cart::new()),
            store: SnapshotStore::memory(),
        }
    }

    /// Restores the cart from `store`.
    ///
    /// Starts empty when nothing is stored, the stored version differs, or
    /// the stored value cannot be decoded.
    pub async fn load(store: SnapshotStore) -> Self {
        let cart = match store.load::<CartSnapshot>(CART_STORAGE_KEY, CART_STORAGE_VERSION).await {
            Ok(Some(snapshot)) => {
                let cart = Cart::from(snapshot);
                info!(
                    lines = cart.line_count(),
                    items = cart.item_count(),
                    "Restored cart from client storage"
                );
                cart
            }
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable cart snapshot");
                Cart::new()
            }
        };

        CartState {
            cart: Mutex::new(cart),
            store,
        }
    }

    /// Whether the cart survives restarts.
    pub fn is_persistent(&self) -> bool {
        self.store.is_durable()
    }

    /// Runs a read-only closure against the cart.
    pub async fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().await;
        f(&cart)
    }

    /// Runs a mutating closure against the cart, then saves the snapshot.
    ///
    /// A failed save is logged and otherwise ignored.
    pub async fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().await;
        let result = f(&mut cart);
        self.persist(&cart).await;
        result
    }

    /// Current items and totals.
    pub async fn snapshot(&self) -> CartResponse {
        self.with_cart(|c| CartResponse::from(c)).await
    }

    /// Locks the cart for the duration of a checkout.
    ///
    /// Other cart commands wait until the returned guard is dropped or
    /// [`CheckoutGuard::complete`] is called.
    pub async fn begin_checkout(&self) -> CheckoutGuard<'_> {
        CheckoutGuard {
            cart: self.cart.lock().await,
            state: self,
        }
    }

    async fn persist(&self, cart: &Cart) {
        let snapshot = CartSnapshot::from(cart);
        match self
            .store
            .save(CART_STORAGE_KEY, CART_STORAGE_VERSION, &snapshot)
            .await
        {
            Ok(()) => debug!(items = snapshot.item_count, "Cart snapshot saved"),
            Err(e) => warn!(error = %e, "Failed to save cart snapshot, continuing in memory"),
        }
    }
}

/// Exclusive access to the cart while a payment is authorized.
pub struct CheckoutGuard<'a> {
    cart: MutexGuard<'a, Cart>,
    state: &'a CartState,
}

impl CheckoutGuard<'_> {
    /// The cart being checked out.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Empties the purchased cart and saves the empty snapshot.
    pub async fn complete(mut self) {
        self.cart.clear();
        self.state.persist(&self.cart).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use atelier_core::NewCartItem;
    use atelier_store::{Database, DbConfig};

    fn pendant() -> NewCartItem {
        NewCartItem::new("pend-03", "pend-03-gold", "Moonstone Pendant", Money::from_cents(6500))
            .with_attribute("chain", "18in")
    }

    #[tokio::test]
    async fn test_mutation_is_persisted() {
        let store = SnapshotStore::memory();
        let state = CartState::load(store.clone()).await;

        state
            .with_cart_mut(|c| {
                c.add_item(pendant().with_quantity(2));
            })
            .await;

        let saved: CartSnapshot = store
            .load(CART_STORAGE_KEY, CART_STORAGE_VERSION)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(saved.item_count, 2);
        assert_eq!(saved.subtotal, Money::from_cents(13_000));
    }

    #[tokio::test]
    async fn test_reload_restores_identical_cart() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let store = SnapshotStore::sqlite(&db);

        let first = CartState::load(store.clone()).await;
        first
            .with_cart_mut(|c| {
                c.add_item(pendant());
                c.add_item(NewCartItem::new("ear-09", "ear-09", "Hoops", Money::from_cents(3100)));
            })
            .await;
        let before = first.snapshot().await;

        let second = CartState::load(store).await;
        assert!(second.is_persistent());
        assert_eq!(second.snapshot().await, before);
    }

    #[tokio::test]
    async fn test_version_mismatch_starts_empty() {
        let store = SnapshotStore::memory();
        let mut cart = Cart::new();
        cart.add_item(pendant());
        store
            .save(CART_STORAGE_KEY, CART_STORAGE_VERSION + 1, &CartSnapshot::from(&cart))
            .await
            .unwrap();

        let state = CartState::load(store).await;
        assert!(state.snapshot().await.items.is_empty());
    }

    #[tokio::test]
    async fn test_undecodable_snapshot_starts_empty() {
        let store = SnapshotStore::memory();
        store
            .save(CART_STORAGE_KEY, CART_STORAGE_VERSION, &serde_json::json!({"items": 7}))
            .await
            .unwrap();

        let state = CartState::load(store).await;
        assert_eq!(state.snapshot().await.totals.item_count, 0);
    }

    #[tokio::test]
    async fn test_save_failure_keeps_cart_in_memory() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let state = CartState::load(SnapshotStore::sqlite(&db)).await;
        db.close().await;

        let response = state
            .with_cart_mut(|c| {
                c.add_item(pendant());
                CartResponse::from(&*c)
            })
            .await;

        assert_eq!(response.totals.item_count, 1);
        assert_eq!(state.snapshot().await.totals.item_count, 1);
    }

    #[tokio::test]
    async fn test_checkout_guard_clears_and_saves() {
        let store = SnapshotStore::memory();
        let state = CartState::load(store.clone()).await;
        state.with_cart_mut(|c| {
            c.add_item(pendant());
        })
        .await;

        let guard = state.begin_checkout().await;
        assert_eq!(guard.cart().line_count(), 1);
        guard.complete().await;

        assert!(state.snapshot().await.items.is_empty());
        let saved: CartSnapshot = store.load(CART_STORAGE_KEY, 0).await.unwrap().unwrap();
        assert!(saved.items.is_empty());
    }

    #[tokio::test]
    async fn test_dropped_checkout_guard_keeps_cart() {
        let state = CartState::in_memory();
        state.with_cart_mut(|c| {
            c.add_item(pendant());
        })
        .await;

        drop(state.begin_checkout().await);
        assert_eq!(state.snapshot().await.totals.line_count, 1);
    }

    #[test]
    fn test_response_field_names() {
        let mut cart = Cart::new();
        cart.add_item(pendant());
        let json = serde_json::to_value(CartResponse::from(&cart)).unwrap();

        assert_eq!(json["totals"]["subtotal"], 6500);
        assert_eq!(json["totals"]["itemCount"], 1);
        assert_eq!(json["totals"]["lineCount"], 1);
        assert_eq!(json["items"][0]["productId"], "pend-03");
    }
}
