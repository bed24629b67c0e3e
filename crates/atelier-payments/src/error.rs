//! # Payment Error Types
//!
//! Reasons the processor refuses a request. The `Display` text of each
//! variant is exactly the message placed in `PaymentResponse.error`.

use thiserror::Error;

/// Why an authorization did not succeed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaymentError {
    /// Card number missing or too short.
    #[error("Invalid card number")]
    InvalidCardNumber,

    /// Expiry missing or without a `/` separator.
    #[error("Invalid expiry date")]
    InvalidExpiry,

    /// CVV missing or too short.
    #[error("Invalid CVV")]
    InvalidCvv,

    /// The test decline hook fired.
    #[error("Card declined. Please use a different card.")]
    Declined,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(PaymentError::InvalidCardNumber.to_string(), "Invalid card number");
        assert_eq!(PaymentError::InvalidExpiry.to_string(), "Invalid expiry date");
        assert_eq!(PaymentError::InvalidCvv.to_string(), "Invalid CVV");
        assert_eq!(
            PaymentError::Declined.to_string(),
            "Card declined. Please use a different card."
        );
    }
}
