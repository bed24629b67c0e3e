//! # Checkout Command
//!
//! Turns the cart into an authorized payment.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         checkout(card, billingAddress)                  │
//! │                                                                         │
//! │  1. Lock the cart ─────────────── other cart commands wait              │
//! │  2. Empty cart?                ─► CART_ERROR "Cart is empty"            │
//! │  3. Build PaymentRequest          amount = subtotal                     │
//! │                                   currency = configured code            │
//! │  4. Checkout-form validation   ─► VALIDATION_ERROR                      │
//! │     (Luhn, expiry, CVV, address)                                        │
//! │  5. MockProcessor::charge      ─► PAYMENT_ERROR (cart untouched)        │
//! │  6. Approved: clear + save cart                                         │
//! │  7. Return OrderConfirmation                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation runs before the processor so the shopper is never charged
//! latency for a form that could not succeed. The processor still applies
//! its own, looser checks to whatever reaches it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use atelier_core::card::{classify_issuer, mask_card_number};
use atelier_core::validation::validate_payment_request;
use atelier_core::{
    BillingAddress, CardDetails, CardIssuer, CartItem, CoreError, Money, PaymentRequest,
};

use crate::error::ApiError;
use crate::state::{CartState, ConfigState, PaymentsState};

/// What the shopper sees after a successful checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderConfirmation {
    pub transaction_id: String,
    pub store_name: String,
    /// Amount charged in minor units
    pub amount: Money,
    /// Amount as displayed, e.g. "$129.00"
    pub amount_formatted: String,
    pub currency: String,
    /// e.g. "•••• 4242"
    pub card_masked: String,
    pub card_issuer: CardIssuer,
    /// The purchased lines, as they were in the cart
    pub items: Vec<CartItem>,
    pub item_count: u64,
    pub placed_at: DateTime<Utc>,
}

/// Pays for the cart.
pub async fn checkout(
    cart: &CartState,
    config: &ConfigState,
    payments: &PaymentsState,
    card: CardDetails,
    billing_address: BillingAddress,
) -> Result<OrderConfirmation, ApiError> {
    checkout_at(cart, config, payments, card, billing_address, Utc::now()).await
}

/// [`checkout`] with an explicit clock for the expiry check.
pub async fn checkout_at(
    cart: &CartState,
    config: &ConfigState,
    payments: &PaymentsState,
    card: CardDetails,
    billing_address: BillingAddress,
    now: DateTime<Utc>,
) -> Result<OrderConfirmation, ApiError> {
    debug!(card = ?card, "checkout command");

    let guard = cart.begin_checkout().await;

    if guard.cart().is_empty() {
        return Err(CoreError::EmptyCart.into());
    }

    let request = PaymentRequest {
        amount: guard.cart().subtotal(),
        currency: config.currency_code.clone(),
        card,
        billing_address,
    };

    validate_payment_request(&request, now)?;

    info!(
        amount = request.amount.cents(),
        currency = %request.currency,
        lines = guard.cart().line_count(),
        "Submitting payment"
    );

    let transaction_id = match payments.processor().charge(&request).await {
        Ok(transaction_id) => transaction_id,
        Err(reason) => {
            warn!(reason = %reason, "Checkout failed, cart kept");
            return Err(reason.into());
        }
    };

    let confirmation = OrderConfirmation {
        transaction_id,
        store_name: config.store_name.clone(),
        amount: request.amount,
        amount_formatted: config.format_currency(request.amount.cents()),
        currency: request.currency.clone(),
        card_masked: mask_card_number(&request.card.number),
        card_issuer: classify_issuer(&request.card.number),
        items: guard.cart().items().to_vec(),
        item_count: guard.cart().item_count(),
        placed_at: now,
    };

    guard.complete().await;

    info!(
        transaction_id = %confirmation.transaction_id,
        amount = %confirmation.amount_formatted,
        "Order placed"
    );

    Ok(confirmation)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::cart::{add_to_cart, get_cart};
    use crate::error::ErrorCode;
    use atelier_core::NewCartItem;
    use atelier_payments::ProcessorConfig;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 15, 12, 0, 0).unwrap()
    }

    fn card(number: &str, cvv: &str) -> CardDetails {
        CardDetails {
            number: number.to_string(),
            holder_name: "Ines Okafor".to_string(),
            expiry: "12/30".to_string(),
            cvv: cvv.to_string(),
        }
    }

    fn address() -> BillingAddress {
        BillingAddress {
            name: "Ines Okafor".to_string(),
            line1: "88 Kiln Street".to_string(),
            line2: Some("Studio 4".to_string()),
            city: "Asheville".to_string(),
            state: "NC".to_string(),
            postal_code: "28801".to_string(),
            country: "US".to_string(),
            phone: None,
        }
    }

    fn payments() -> PaymentsState {
        PaymentsState::new(ProcessorConfig::instant())
    }

    async fn filled_cart() -> CartState {
        let cart = CartState::in_memory();
        add_to_cart(
            &cart,
            NewCartItem::new("neck-21", "neck-21-brass", "Brass Leaf Necklace", Money::from_cents(8900)),
        )
        .await;
        add_to_cart(
            &cart,
            NewCartItem::new("ring-04", "ring-04-6", "Stacking Ring", Money::from_cents(2000)).with_quantity(2),
        )
        .await;
        cart
    }

    #[tokio::test]
    async fn test_successful_checkout_clears_cart() {
        let cart = filled_cart().await;
        let config = ConfigState::default();

        let confirmation = checkout_at(
            &cart,
            &config,
            &payments(),
            card("4242424242424242", "123"),
            address(),
            now(),
        )
        .await
        .unwrap();

        assert!(confirmation.transaction_id.starts_with("txn_"));
        assert_eq!(confirmation.amount, Money::from_cents(12_900));
        assert_eq!(confirmation.amount_formatted, "$129.00");
        assert_eq!(confirmation.currency, "USD");
        assert_eq!(confirmation.card_masked, "•••• 4242");
        assert_eq!(confirmation.card_issuer, CardIssuer::Visa);
        assert_eq!(confirmation.items.len(), 2);
        assert_eq!(confirmation.item_count, 3);

        assert!(get_cart(&cart).await.items.is_empty());
    }

    #[tokio::test]
    async fn test_empty_cart_is_rejected() {
        let cart = CartState::in_memory();
        let err = checkout_at(
            &cart,
            &ConfigState::default(),
            &payments(),
            card("4242424242424242", "123"),
            address(),
            now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart is empty");
    }

    #[tokio::test]
    async fn test_luhn_failure_is_validation_error() {
        let cart = filled_cart().await;
        let err = checkout_at(
            &cart,
            &ConfigState::default(),
            &payments(),
            card("4242424242424241", "123"),
            address(),
            now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&cart).await.totals.item_count, 3);
    }

    #[tokio::test]
    async fn test_expired_card_is_validation_error() {
        let cart = filled_cart().await;
        let mut expired = card("4242424242424242", "123");
        expired.expiry = "04/26".to_string();

        let err = checkout_at(&cart, &ConfigState::default(), &payments(), expired, address(), now())
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Card has expired");
    }

    #[tokio::test]
    async fn test_amex_needs_four_digit_cvv() {
        let cart = filled_cart().await;
        let config = ConfigState::default();

        let err = checkout_at(&cart, &config, &payments(), card("378282246310005", "123"), address(), now())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let confirmation =
            checkout_at(&cart, &config, &payments(), card("378282246310005", "1234"), address(), now())
                .await
                .unwrap();
        assert_eq!(confirmation.card_issuer, CardIssuer::AmericanExpress);
    }

    #[tokio::test]
    async fn test_decline_keeps_cart() {
        let cart = filled_cart().await;
        let before = get_cart(&cart).await;

        // Passes Luhn, ends in 0000
        let err = checkout_at(
            &cart,
            &ConfigState::default(),
            &payments(),
            card("4000000000020000", "123"),
            address(),
            now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Card declined. Please use a different card.");
        assert_eq!(get_cart(&cart).await, before);
    }

    #[tokio::test]
    async fn test_missing_address_field() {
        let cart = filled_cart().await;
        let mut incomplete = address();
        incomplete.city = "  ".to_string();

        let err = checkout_at(
            &cart,
            &ConfigState::default(),
            &payments(),
            card("4242424242424242", "123"),
            incomplete,
            now(),
        )
        .await
        .unwrap_err();

        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
