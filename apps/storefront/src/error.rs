//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Storefront                         │
//! │                                                                         │
//! │  Client                      Rust Backend                               │
//! │  ──────                      ────────────                               │
//! │                                                                         │
//! │  {"command": "checkout", "args": {...}}                                 │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  Command Function                                                │  │
//! │  │  Result<T, ApiError>                                             │  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Bad form input? ─── ValidationError ──────────────┐            │  │
//! │  │         │                                          │            │  │
//! │  │         ▼                                          ▼            │  │
//! │  │  Not authorized? ─── PaymentError ──────────────── ApiError ─────►│  │
//! │  │         │                                                        │  │
//! │  │         ▼                                                        │  │
//! │  │  Success ──────────────────────────────────────────────────────►│  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! │                                                                         │
//! │  {"error": {"code": "PAYMENT_ERROR",                                    │
//! │             "message": "Card declined. Please use a different card."}}  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Storage failures never reach the client from cart commands: the cart
//! keeps working in memory and the failure is logged.

use serde::Serialize;

use atelier_core::{CoreError, ValidationError};
use atelier_payments::PaymentError;

/// API error returned from commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "VALIDATION_ERROR",
///   "message": "Card has expired"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Input validation failed
    ValidationError,

    /// Cart operation refused (e.g. checkout of an empty cart)
    CartError,

    /// The processor did not authorize the payment
    PaymentError,

    /// No such command
    UnknownCommand,

    /// Request line or command arguments could not be decoded
    InvalidArguments,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    /// Creates a payment error.
    pub fn payment(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentError, message)
    }

    /// Creates an unknown command error.
    pub fn unknown_command(command: &str) -> Self {
        ApiError::new(ErrorCode::UnknownCommand, format!("Unknown command: {}", command))
    }

    /// Creates an invalid arguments error.
    pub fn invalid_arguments(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::InvalidArguments, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::EmptyCart => ApiError::cart(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl From<PaymentError> for ApiError {
    fn from(err: PaymentError) -> Self {
        ApiError::payment(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialized_shape() {
        let err = ApiError::payment("Card declined. Please use a different card.");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "PAYMENT_ERROR",
                "message": "Card declined. Please use a different card."
            })
        );
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);
        assert_eq!(err.message, "Cart is empty");

        let err: ApiError = CoreError::Validation(ValidationError::Expired).into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Card has expired");
    }

    #[test]
    fn test_payment_error_mapping() {
        let err: ApiError = PaymentError::Declined.into();
        assert_eq!(err.code, ErrorCode::PaymentError);
        assert_eq!(err.message, "Card declined. Please use a different card.");
    }

    #[test]
    fn test_display() {
        let err = ApiError::unknown_command("fly");
        assert_eq!(err.to_string(), "[UnknownCommand] Unknown command: fly");
    }
}
