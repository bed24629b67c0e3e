//! # Cart
//!
//! The shopping cart: line identity, merge-on-add, quantity bounds and
//! derived totals.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Cart Operations                                 │
//! │                                                                         │
//! │  add_item(candidate)                                                   │
//! │     ├── same (product, variant, attributes) in cart? → qty += incoming │
//! │     └── otherwise                                   → push new line    │
//! │                                                                         │
//! │  update_item_quantity(line_id, qty)                                    │
//! │     ├── qty <= 0        → remove_item(line_id)                         │
//! │     └── otherwise       → qty = exactly qty                            │
//! │                                                                         │
//! │  remove_item(line_id)   → drop the line                                │
//! │                                                                         │
//! │  clear()                → no lines, zero totals                        │
//! │                                                                         │
//! │  After EVERY mutation: subtotal = Σ price × qty, item_count = Σ qty    │
//! │  Unknown line ids are no-ops, never errors.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{CartItem, NewCartItem};

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per (product_id, variant_id, attributes)
/// - Every line has quantity >= 1
/// - `subtotal` and `item_count` always equal the sums over current lines;
///   they have no setters
/// - `subtotal` saturates at `i64::MAX` instead of wrapping
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Cart {
    items: Vec<CartItem>,
    subtotal: Money,
    item_count: u64,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart::default()
    }

    /// Builds a cart from existing lines, recomputing the totals.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart {
            items,
            subtotal: Money::zero(),
            item_count: 0,
        };
        cart.recompute();
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Σ price × quantity over all lines.
    pub fn subtotal(&self) -> Money {
        self.subtotal
    }

    /// Σ quantity over all lines.
    pub fn item_count(&self) -> u64 {
        self.item_count
    }

    /// Number of distinct lines.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn find_line(&self, line_id: &str) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id == line_id)
    }

    /// Adds a candidate line or merges it into the matching one.
    ///
    /// Returns the line that now holds the candidate. A candidate with
    /// quantity 0 is ignored and `None` is returned.
    ///
    /// ## Behavior
    /// - Matching line (same product, variant and attributes): its quantity
    ///   grows by the candidate's quantity. No upper bound.
    /// - No match: the candidate becomes a new line with a fresh line id.
    pub fn add_item(&mut self, candidate: NewCartItem) -> Option<&CartItem> {
        if candidate.quantity == 0 {
            return None;
        }

        let index = match self.items.iter().position(|i| i.is_same_line(&candidate)) {
            Some(index) => {
                let line = &mut self.items[index];
                line.quantity = line.quantity.saturating_add(candidate.quantity);
                index
            }
            None => {
                self.items.push(CartItem::from_new(candidate));
                self.items.len() - 1
            }
        };

        self.recompute();
        self.items.get(index)
    }

    /// Sets a line's quantity exactly. `quantity <= 0` removes the line.
    ///
    /// Returns whether the cart changed. Unknown line ids are a no-op.
    pub fn update_item_quantity(&mut self, line_id: &str, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_item(line_id);
        }

        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let changed = match self.items.iter_mut().find(|i| i.id == line_id) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        };

        self.recompute();
        changed
    }

    /// Removes a line. Returns whether it was present.
    pub fn remove_item(&mut self, line_id: &str) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id != line_id);
        self.recompute();
        self.items.len() != initial_len
    }

    /// Empties the cart and zeroes both totals.
    pub fn clear(&mut self) {
        self.items.clear();
        self.recompute();
    }

    fn recompute(&mut self) {
        self.subtotal = self.items.iter().map(CartItem::line_total).sum();
        self.item_count = self.items.iter().map(|i| u64::from(i.quantity)).sum();
    }
}

// =============================================================================
// Snapshot
// =============================================================================

/// Serialized form of the cart: the lines plus the two derived totals.
///
/// Totals are written for consumers that read the snapshot directly; when a
/// snapshot is turned back into a [`Cart`] they are recomputed from the lines.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartSnapshot {
    pub items: Vec<CartItem>,
    pub subtotal: Money,
    pub item_count: u64,
}

impl From<&Cart> for CartSnapshot {
    fn from(cart: &Cart) -> Self {
        CartSnapshot {
            items: cart.items.clone(),
            subtotal: cart.subtotal,
            item_count: cart.item_count,
        }
    }
}

impl From<CartSnapshot> for Cart {
    fn from(snapshot: CartSnapshot) -> Self {
        Cart::from_items(
            snapshot
                .items
                .into_iter()
                .filter(|i| i.quantity > 0)
                .collect(),
        )
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(material: &str) -> NewCartItem {
        NewCartItem::new("ring-01", "ring-01-size-7", "Hammered Band", Money::from_cents(4800))
            .with_attribute("material", material)
            .with_attribute("size", "7")
    }

    fn studs() -> NewCartItem {
        NewCartItem::new("stud-02", "stud-02-opal", "Opal Studs", Money::from_cents(2450))
    }

    fn assert_totals_consistent(cart: &Cart) {
        let subtotal: i64 = cart
            .items()
            .iter()
            .map(|i| i.price.cents() * i64::from(i.quantity))
            .sum();
        let count: u64 = cart.items().iter().map(|i| u64::from(i.quantity)).sum();
        assert_eq!(cart.subtotal().cents(), subtotal);
        assert_eq!(cart.item_count(), count);
    }

    #[test]
    fn test_add_item() {
        let mut cart = Cart::new();
        let line = cart.add_item(ring("silver").with_quantity(2)).unwrap().clone();

        assert_eq!(line.quantity, 2);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal().cents(), 9600);
    }

    #[test]
    fn test_add_same_line_merges_quantities() {
        let mut cart = Cart::new();
        let first_id = cart.add_item(ring("silver")).unwrap().id.clone();
        cart.add_item(ring("silver").with_quantity(3));
        let merged = cart.add_item(ring("silver").with_quantity(5)).unwrap();

        assert_eq!(merged.id, first_id);
        assert_eq!(merged.quantity, 9);
        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 9);
    }

    #[test]
    fn test_merge_keeps_original_snapshot() {
        let mut cart = Cart::new();
        cart.add_item(ring("silver"));
        let repriced = NewCartItem { price: Money::from_cents(5200), ..ring("silver") };
        let line = cart.add_item(repriced).unwrap();

        assert_eq!(line.price.cents(), 4800);
        assert_eq!(cart.subtotal().cents(), 9600);
    }

    #[test]
    fn test_different_attributes_create_distinct_lines() {
        let mut cart = Cart::new();
        cart.add_item(ring("silver"));
        cart.add_item(ring("gold"));
        cart.add_item(ring("silver").with_attribute("gemstone", "garnet"));

        assert_eq!(cart.line_count(), 3);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_zero_quantity_is_ignored() {
        let mut cart = Cart::new();
        assert!(cart.add_item(studs().with_quantity(0)).is_none());
        assert!(cart.is_empty());
    }

    #[test]
    fn test_update_quantity_sets_exactly() {
        let mut cart = Cart::new();
        let id = cart.add_item(studs().with_quantity(4)).unwrap().id.clone();

        assert!(cart.update_item_quantity(&id, 2));
        assert_eq!(cart.find_line(&id).unwrap().quantity, 2);
        assert_eq!(cart.subtotal().cents(), 4900);
    }

    #[test]
    fn test_update_to_zero_or_negative_removes() {
        let mut cart = Cart::new();
        let a = cart.add_item(studs()).unwrap().id.clone();
        let b = cart.add_item(ring("silver")).unwrap().id.clone();

        assert!(cart.update_item_quantity(&a, 0));
        assert!(cart.find_line(&a).is_none());

        assert!(cart.update_item_quantity(&b, -1));
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_unknown_line_is_noop() {
        let mut cart = Cart::new();
        cart.add_item(studs());
        let before = cart.clone();

        assert!(!cart.update_item_quantity("missing", 3));
        assert!(!cart.update_item_quantity("missing", 0));
        assert!(!cart.remove_item("missing"));
        assert_eq!(cart, before);
    }

    #[test]
    fn test_huge_price_and_quantity_saturate() {
        let mut cart = Cart::new();
        let tiara = NewCartItem::new("tiara-09", "tiara-09", "Crown Tiara", Money::from_cents(3_000_000_000));
        let id = cart.add_item(tiara).unwrap().id.clone();

        assert!(cart.update_item_quantity(&id, 4_000_000_000));
        assert_eq!(cart.find_line(&id).unwrap().quantity, 4_000_000_000);
        assert_eq!(cart.subtotal().cents(), i64::MAX);

        cart.add_item(studs());
        assert_eq!(cart.subtotal().cents(), i64::MAX);
        assert_eq!(cart.item_count(), 4_000_000_001);
    }

    #[test]
    fn test_clear() {
        let mut cart = Cart::new();
        cart.add_item(studs().with_quantity(2));
        cart.add_item(ring("gold"));

        cart.clear();
        assert!(cart.items().is_empty());
        assert_eq!(cart.subtotal(), Money::zero());
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_totals_hold_across_interleavings() {
        let mut cart = Cart::new();
        let a = cart.add_item(studs()).unwrap().id.clone();
        assert_totals_consistent(&cart);
        let b = cart.add_item(ring("silver").with_quantity(2)).unwrap().id.clone();
        assert_totals_consistent(&cart);
        cart.add_item(studs().with_quantity(4));
        assert_totals_consistent(&cart);
        cart.update_item_quantity(&b, 7);
        assert_totals_consistent(&cart);
        cart.remove_item(&a);
        assert_totals_consistent(&cart);
        cart.add_item(ring("gold"));
        cart.update_item_quantity(&b, -3);
        assert_totals_consistent(&cart);

        assert_eq!(cart.line_count(), 1);
        assert_eq!(cart.item_count(), 1);
        assert_eq!(cart.subtotal().cents(), 4800);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let mut cart = Cart::new();
        cart.add_item(ring("silver").with_image("https://cdn.example/ring.jpg"));
        cart.add_item(studs().with_quantity(3));

        let snapshot = CartSnapshot::from(&cart);
        let json = serde_json::to_string(&snapshot).unwrap();
        let decoded: CartSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(decoded, snapshot);

        let restored = Cart::from(decoded);
        assert_eq!(restored, cart);
    }

    #[test]
    fn test_snapshot_totals_are_recomputed_on_load() {
        let mut cart = Cart::new();
        cart.add_item(studs().with_quantity(2));

        let mut snapshot = CartSnapshot::from(&cart);
        snapshot.subtotal = Money::from_cents(1);
        snapshot.item_count = 99;

        let restored = Cart::from(snapshot);
        assert_eq!(restored.subtotal().cents(), 4900);
        assert_eq!(restored.item_count(), 2);
    }

    #[test]
    fn test_snapshot_json_field_names() {
        let mut cart = Cart::new();
        cart.add_item(studs());
        let value = serde_json::to_value(CartSnapshot::from(&cart)).unwrap();

        assert_eq!(value["itemCount"], 1);
        assert_eq!(value["subtotal"], 2450);
        assert_eq!(value["items"][0]["productId"], "stud-02");
        assert_eq!(value["items"][0]["variantId"], "stud-02-opal");
    }
}
