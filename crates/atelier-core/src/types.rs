//! # Domain Types
//!
//! Value types shared by the cart, the payment processor and the UI.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  NewCartItem    │──►│    CartItem     │   │ PaymentRequest  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_id     │   │  id (line UUID) │   │  amount         │       │
//! │  │  variant_id     │   │  product_id     │   │  currency       │       │
//! │  │  attributes     │   │  variant_id     │   │  card           │       │
//! │  │  price, qty     │   │  attributes     │   │  billing_address│       │
//! │  └─────────────────┘   │  price, qty     │   └────────┬────────┘       │
//! │                        └─────────────────┘            ▼                 │
//! │                                              ┌─────────────────┐       │
//! │                                              │ PaymentResponse │       │
//! │                                              │  success        │       │
//! │                                              │  transaction_id │       │
//! │                                              │  error          │       │
//! │                                              └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Pattern
//! Name, price and image are copied into the line when it is added and are
//! never re-synced with the catalog afterwards.

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::card::mask_card_number;
use crate::money::Money;

/// Selected variant dimensions, e.g. `material → "silver"`, `size → "7"`.
///
/// A `BTreeMap` so that two selections compare and serialize identically
/// regardless of the order the UI picked them in.
pub type VariantAttributes = BTreeMap<String, String>;

fn default_quantity() -> u32 {
    1
}

// =============================================================================
// New Cart Item
// =============================================================================

/// A candidate line, as submitted by the product page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewCartItem {
    pub product_id: String,
    pub variant_id: String,
    pub name: String,
    /// Unit price in minor units.
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    /// Missing and empty are the same selection.
    #[serde(default)]
    pub attributes: VariantAttributes,
}

impl NewCartItem {
    /// Creates a candidate line with quantity 1 and no attributes.
    pub fn new(
        product_id: impl Into<String>,
        variant_id: impl Into<String>,
        name: impl Into<String>,
        price: Money,
    ) -> Self {
        NewCartItem {
            product_id: product_id.into(),
            variant_id: variant_id.into(),
            name: name.into(),
            price,
            image: None,
            quantity: 1,
            attributes: VariantAttributes::new(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

// =============================================================================
// Cart Item
// =============================================================================

/// One line in the cart.
///
/// ## Identity
/// `id` names the line, not the product. Two lines are the *same line* iff
/// `product_id`, `variant_id` and the full `attributes` mapping are equal;
/// see [`CartItem::is_same_line`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line id (UUID v4), generated when the line is created.
    pub id: String,
    pub product_id: String,
    pub variant_id: String,
    /// Product name at time of adding (frozen).
    pub name: String,
    /// Unit price at time of adding (frozen).
    pub price: Money,
    #[serde(default)]
    pub image: Option<String>,
    /// Always >= 1 while the line exists.
    pub quantity: u32,
    #[serde(default)]
    pub attributes: VariantAttributes,
    #[ts(as = "String")]
    pub added_at: DateTime<Utc>,
}

impl CartItem {
    /// Creates a fresh line from a candidate, assigning a new line id.
    pub fn from_new(item: NewCartItem) -> Self {
        CartItem {
            id: Uuid::new_v4().to_string(),
            product_id: item.product_id,
            variant_id: item.variant_id,
            name: item.name,
            price: item.price,
            image: item.image,
            quantity: item.quantity,
            attributes: item.attributes,
            added_at: Utc::now(),
        }
    }

    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.price * self.quantity
    }

    /// Whether a candidate describes this same purchasable line.
    pub fn is_same_line(&self, candidate: &NewCartItem) -> bool {
        self.product_id == candidate.product_id
            && self.variant_id == candidate.variant_id
            && self.attributes == candidate.attributes
    }
}

// =============================================================================
// Payment Request / Response
// =============================================================================

/// Card details as typed into the checkout form.
///
/// Fields are kept as raw strings: the processor applies its own checks to
/// exactly what the shopper typed.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardDetails {
    pub number: String,
    pub holder_name: String,
    /// `MM/YY` as typed.
    pub expiry: String,
    pub cvv: String,
}

/// Never print a full card number or CVV, not even in debug logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("number", &mask_card_number(&self.number))
            .field("holder_name", &self.holder_name)
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

/// Billing address collected at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct BillingAddress {
    pub name: String,
    pub line1: String,
    #[serde(default)]
    pub line2: Option<String>,
    pub city: String,
    /// State, province or region.
    pub state: String,
    pub postal_code: String,
    /// Country code or name.
    pub country: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// A request to authorize a card payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentRequest {
    pub amount: Money,
    /// ISO 4217 currency code.
    pub currency: String,
    pub card: CardDetails,
    pub billing_address: BillingAddress,
}

/// Outcome of an authorization attempt.
///
/// Failures are values, never panics or thrown errors: `success == false`
/// always carries a human-readable `error`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct PaymentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transaction_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PaymentResponse {
    pub fn approved(transaction_id: impl Into<String>) -> Self {
        PaymentResponse {
            success: true,
            transaction_id: Some(transaction_id.into()),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        PaymentResponse {
            success: false,
            transaction_id: None,
            error: Some(error.into()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
