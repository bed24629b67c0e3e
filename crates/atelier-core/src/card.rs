//! # Card Helpers
//!
//! Pure functions over a typed card number: checksum validation, display
//! formatting and issuer lookup.
//!
//! All helpers first strip every non-digit character, so `"4532 0151-1283 0366"`
//! and `"4532015112830366"` are the same input.
//!
//! ## Luhn Checksum
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  4  5  3  2  0  1  5  1  1  2  8  3  0  3  6  6                        │
//! │  ×2    ×2    ×2    ×2    ×2    ×2    ×2    ×2                          │
//! │  ◄───────────────────── walk from the right ────────────────────────── │
//! │                                                                         │
//! │  every second digit from the right (starting at the second-to-last)    │
//! │  is doubled; a doubled value above 9 has 9 subtracted                  │
//! │                                                                         │
//! │  sum % 10 == 0  ──►  checksum OK                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use ts_rs::TS;

use crate::{MAX_CARD_DIGITS, MIN_CARD_DIGITS};

// =============================================================================
// Issuer
// =============================================================================

/// Card network, guessed from the leading digits alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub enum CardIssuer {
    #[serde(rename = "Visa")]
    Visa,
    #[serde(rename = "Mastercard")]
    Mastercard,
    #[serde(rename = "American Express")]
    AmericanExpress,
    #[serde(rename = "Discover")]
    Discover,
    #[serde(rename = "Unknown")]
    Unknown,
}

impl CardIssuer {
    /// Display label, as shown next to the card field.
    pub const fn label(&self) -> &'static str {
        match self {
            CardIssuer::Visa => "Visa",
            CardIssuer::Mastercard => "Mastercard",
            CardIssuer::AmericanExpress => "American Express",
            CardIssuer::Discover => "Discover",
            CardIssuer::Unknown => "Unknown",
        }
    }

    /// Number of digits in this network's security code.
    pub const fn cvv_len(&self) -> usize {
        match self {
            CardIssuer::AmericanExpress => 4,
            _ => 3,
        }
    }
}

impl fmt::Display for CardIssuer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// =============================================================================
// Validation Result
// =============================================================================

/// Transient classification of a typed card number. Never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CardValidationResult {
    pub is_valid: bool,
    pub formatted: String,
    pub issuer: CardIssuer,
}

// =============================================================================
// Functions
// =============================================================================

/// Keeps only the ASCII digits of `raw`.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Validates a card number: 13 to 19 digits and a passing Luhn checksum.
///
/// ## Example
/// ```rust
/// use atelier_core::card::validate_card_number;
///
/// assert!(validate_card_number("4532 0151 1283 0366"));
/// assert!(!validate_card_number("1234567890123456"));
/// assert!(!validate_card_number("000000000000")); // 12 digits
/// ```
pub fn validate_card_number(raw: &str) -> bool {
    let digits = digits_only(raw);

    if !(MIN_CARD_DIGITS..=MAX_CARD_DIGITS).contains(&digits.len()) {
        return false;
    }

    luhn_sum(&digits) % 10 == 0
}

fn luhn_sum(digits: &str) -> u32 {
    digits
        .bytes()
        .rev()
        .enumerate()
        .map(|(i, b)| {
            let d = u32::from(b - b'0');
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum()
}

/// Re-groups the digits into blocks of four separated by single spaces.
///
/// ## Example
/// ```rust
/// use atelier_core::card::format_card_number;
///
/// assert_eq!(format_card_number("4532015112830366"), "4532 0151 1283 0366");
/// assert_eq!(format_card_number("3782-822463-10005"), "3782 8224 6310 005");
/// ```
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    let mut formatted = String::with_capacity(digits.len() + digits.len() / 4);

    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(c);
    }

    formatted
}

/// Classifies the issuer from the leading digits. First matching rule wins.
///
/// | Prefix | Issuer |
/// |---|---|
/// | `4` | Visa |
/// | `51`–`55` | Mastercard |
/// | `34`, `37` | American Express |
/// | `6011`, `65` | Discover |
pub fn classify_issuer(raw: &str) -> CardIssuer {
    let digits = digits_only(raw);

    if digits.starts_with('4') {
        CardIssuer::Visa
    } else if matches!(digits.get(..2), Some("51" | "52" | "53" | "54" | "55")) {
        CardIssuer::Mastercard
    } else if digits.starts_with("34") || digits.starts_with("37") {
        CardIssuer::AmericanExpress
    } else if digits.starts_with("6011") || digits.starts_with("65") {
        CardIssuer::Discover
    } else {
        CardIssuer::Unknown
    }
}

/// Runs all three classifications at once, for the checkout form.
pub fn inspect_card(raw: &str) -> CardValidationResult {
    CardValidationResult {
        is_valid: validate_card_number(raw),
        formatted: format_card_number(raw),
        issuer: classify_issuer(raw),
    }
}

/// Hides everything but the last four digits: `"•••• 0366"`.
pub fn mask_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < 4 {
        return "••••".to_string();
    }
    format!("•••• {}", &digits[digits.len() - 4..])
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_known_numbers() {
        assert!(validate_card_number("4532015112830366"));
        assert!(validate_card_number("4111111111111111"));
        assert!(validate_card_number("5555555555554444"));
        assert!(validate_card_number("378282246310005"));
        assert!(validate_card_number("6011111111111117"));

        assert!(!validate_card_number("1234567890123456"));
        assert!(!validate_card_number("4532015112830367"));
    }

    #[test]
    fn test_validate_length_bounds() {
        // 12 digits with a passing checksum is still rejected
        assert!(!validate_card_number("000000000000"));
        // 13 and 19 digits are the inclusive bounds
        assert!(validate_card_number("0000000000000"));
        assert!(validate_card_number("0000000000000000000"));
        assert!(!validate_card_number("00000000000000000000"));
        assert!(!validate_card_number(""));
    }

    #[test]
    fn test_validate_ignores_separators() {
        assert!(validate_card_number("4532 0151 1283 0366"));
        assert!(validate_card_number("4532-0151-1283-0366"));
        assert!(!validate_card_number("card: 1234 5678 9012 3456"));
    }

    #[test]
    fn test_format_card_number() {
        assert_eq!(format_card_number("4532015112830366"), "4532 0151 1283 0366");
        assert_eq!(format_card_number("4532 0151 1283 0366"), "4532 0151 1283 0366");
        assert_eq!(format_card_number("12345"), "1234 5");
        assert_eq!(format_card_number("1234"), "1234");
        assert_eq!(format_card_number("abc"), "");
    }

    #[test]
    fn test_classify_issuer() {
        assert_eq!(classify_issuer("4111111111111111"), CardIssuer::Visa);
        assert_eq!(classify_issuer("5105105105105100"), CardIssuer::Mastercard);
        assert_eq!(classify_issuer("5555555555554444"), CardIssuer::Mastercard);
        assert_eq!(classify_issuer("5611111111111111"), CardIssuer::Unknown);
        assert_eq!(classify_issuer("378282246310005"), CardIssuer::AmericanExpress);
        assert_eq!(classify_issuer("341111111111111"), CardIssuer::AmericanExpress);
        assert_eq!(classify_issuer("6011111111111117"), CardIssuer::Discover);
        assert_eq!(classify_issuer("6511111111111111"), CardIssuer::Discover);
        assert_eq!(classify_issuer("9999999999999999"), CardIssuer::Unknown);
        assert_eq!(classify_issuer(""), CardIssuer::Unknown);
    }

    #[test]
    fn test_issuer_labels() {
        assert_eq!(classify_issuer("4111111111111111").to_string(), "Visa");
        assert_eq!(CardIssuer::AmericanExpress.to_string(), "American Express");
        assert_eq!(
            serde_json::to_string(&CardIssuer::AmericanExpress).unwrap(),
            "\"American Express\""
        );
    }

    #[test]
    fn test_inspect_card() {
        let result = inspect_card("6011111111111117");
        assert!(result.is_valid);
        assert_eq!(result.formatted, "6011 1111 1111 1117");
        assert_eq!(result.issuer, CardIssuer::Discover);
    }

    #[test]
    fn test_mask_card_number() {
        assert_eq!(mask_card_number("4532 0151 1283 0366"), "•••• 0366");
        assert_eq!(mask_card_number("12"), "••••");
    }
}
