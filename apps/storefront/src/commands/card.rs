//! # Card Commands
//!
//! Live feedback for the card number field while the shopper types.

use tracing::debug;

use atelier_core::card;
use atelier_core::CardValidationResult;

/// Classifies a partially or fully typed card number.
///
/// ## Returns
/// ```json
/// { "isValid": true, "formatted": "4242 4242 4242 4242", "issuer": "Visa" }
/// ```
pub fn inspect_card(number: &str) -> CardValidationResult {
    // Never log the number itself
    debug!(len = number.len(), "inspect_card command");
    card::inspect_card(number)
}
