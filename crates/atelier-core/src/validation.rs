//! # Validation Module
//!
//! Checkout form validation for the storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Storefront UI                                                │
//! │  ├── Live card formatting and issuer badge (card::inspect_card)        │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: checkout command (Rust)                                      │
//! │  ├── Type validation (deserialization)                                 │
//! │  └── THIS MODULE: strict form rules (Luhn, expiry, CVV, address)       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Payment processor                                            │
//! │  └── Its own, looser field checks; decides approve/decline             │
//! │                                                                         │
//! │  Layers 2 and 3 are deliberately independent rule sets.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use atelier_core::validation::{validate_cvv, validate_expiry};
//! use atelier_core::CardIssuer;
//! use chrono::{TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2026, 5, 1, 0, 0, 0).unwrap();
//! assert!(validate_expiry("09/27", now).is_ok());
//! assert!(validate_cvv("1234", CardIssuer::AmericanExpress).is_ok());
//! ```

use chrono::{DateTime, Datelike, Utc};

use crate::card::{classify_issuer, validate_card_number, CardIssuer};
use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{BillingAddress, CardDetails, PaymentRequest};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted free-text field (names, address lines).
const MAX_TEXT_LEN: usize = 100;

// =============================================================================
// String Validators
// =============================================================================

fn validate_text(field: &str, value: &str) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::required(field));
    }

    if value.chars().count() > MAX_TEXT_LEN {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max: MAX_TEXT_LEN,
        });
    }

    Ok(())
}

/// Validates the name printed on the card.
pub fn validate_cardholder_name(name: &str) -> ValidationResult<()> {
    validate_text("cardholder name", name)
}

/// Validates an ISO 4217 currency code (three uppercase ASCII letters).
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_uppercase()) {
        return Err(ValidationError::invalid_format(
            "currency",
            "must be a three-letter ISO 4217 code",
        ));
    }

    Ok(())
}

// =============================================================================
// Card Validators
// =============================================================================

/// Validates a card number with the Luhn checksum and length rules.
pub fn validate_card(number: &str) -> ValidationResult<()> {
    if number.trim().is_empty() {
        return Err(ValidationError::required("card number"));
    }

    if !validate_card_number(number) {
        return Err(ValidationError::InvalidCardNumber);
    }

    Ok(())
}

/// Validates an expiry typed as `MM/YY`.
///
/// ## Rules
/// - Month 01-12, two-digit year
/// - A card is valid through the last day of its expiry month
pub fn validate_expiry(expiry: &str, now: DateTime<Utc>) -> ValidationResult<()> {
    let expiry = expiry.trim();

    if expiry.is_empty() {
        return Err(ValidationError::required("expiry"));
    }

    let (month, year) = expiry
        .split_once('/')
        .ok_or_else(|| ValidationError::invalid_format("expiry", "expected MM/YY"))?;

    let (month, year) = (month.trim(), year.trim());
    let all_digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());
    if month.len() > 2 || year.len() != 2 || !all_digits(month) || !all_digits(year) {
        return Err(ValidationError::invalid_format("expiry", "expected MM/YY"));
    }

    let month: u32 = month
        .parse()
        .map_err(|_| ValidationError::invalid_format("expiry", "expected MM/YY"))?;
    let year: i32 = year
        .parse::<i32>()
        .map_err(|_| ValidationError::invalid_format("expiry", "expected MM/YY"))?
        + 2000;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry month".to_string(),
            min: 1,
            max: 12,
        });
    }

    if (year, month) < (now.year(), now.month()) {
        return Err(ValidationError::Expired);
    }

    Ok(())
}

/// Validates a security code: all digits, 4 for American Express, 3 otherwise.
pub fn validate_cvv(cvv: &str, issuer: CardIssuer) -> ValidationResult<()> {
    let cvv = cvv.trim();

    if cvv.is_empty() {
        return Err(ValidationError::required("cvv"));
    }

    if cvv.len() != issuer.cvv_len() || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::invalid_format(
            "cvv",
            format!("must be {} digits", issuer.cvv_len()),
        ));
    }

    Ok(())
}

/// Validates every card field of the checkout form.
pub fn validate_card_details(card: &CardDetails, now: DateTime<Utc>) -> ValidationResult<()> {
    validate_card(&card.number)?;
    validate_cardholder_name(&card.holder_name)?;
    validate_expiry(&card.expiry, now)?;
    validate_cvv(&card.cvv, classify_issuer(&card.number))?;
    Ok(())
}

// =============================================================================
// Address Validators
// =============================================================================

/// Validates the billing address. Region, line 2 and phone are optional.
pub fn validate_billing_address(address: &BillingAddress) -> ValidationResult<()> {
    validate_text("billing name", &address.name)?;
    validate_text("address line 1", &address.line1)?;
    validate_text("city", &address.city)?;
    validate_text("postal code", &address.postal_code)?;
    validate_text("country", &address.country)?;
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a payment amount: must be positive.
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole payment request before it reaches the processor.
pub fn validate_payment_request(
    request: &PaymentRequest,
    now: DateTime<Utc>,
) -> ValidationResult<()> {
    validate_payment_amount(request.amount)?;
    validate_currency_code(&request.currency)?;
    validate_card_details(&request.card, now)?;
    validate_billing_address(&request.billing_address)?;
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
