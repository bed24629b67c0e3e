//! # Mock Processor
//!
//! The checks here look only at the raw strings of the request and are
//! deliberately looser than checkout-form validation in `atelier-core`:
//! a 15-character number with no Luhn checksum passes, as does any expiry
//! containing a `/`.

use atelier_core::{PaymentRequest, PaymentResponse};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ProcessorConfig;
use crate::error::PaymentError;
use crate::{DECLINE_SUFFIX, TRANSACTION_ID_PREFIX};

const MIN_NUMBER_CHARS: usize = 15;
const MIN_CVV_CHARS: usize = 3;

/// Simulated card processor.
#[derive(Debug, Clone, Default)]
pub struct MockProcessor {
    config: ProcessorConfig,
}

impl MockProcessor {
    pub fn new(config: ProcessorConfig) -> Self {
        MockProcessor { config }
    }

    pub fn config(&self) -> &ProcessorConfig {
        &self.config
    }

    /// Authorizes a payment after the configured latency.
    ///
    /// Always resolves to a response; a failed authorization has
    /// `success == false` and the reason in `error`.
    pub async fn authorize(&self, request: &PaymentRequest) -> PaymentResponse {
        match self.charge(request).await {
            Ok(transaction_id) => PaymentResponse::approved(transaction_id),
            Err(reason) => PaymentResponse::failed(reason.to_string()),
        }
    }

    /// Same as [`authorize`](Self::authorize), with the refusal kept typed.
    ///
    /// Returns the transaction id on approval.
    pub async fn charge(&self, request: &PaymentRequest) -> Result<String, PaymentError> {
        debug!(
            amount = request.amount.cents(),
            currency = %request.currency,
            latency_ms = self.config.latency.as_millis() as u64,
            "Authorizing payment"
        );

        if !self.config.latency.is_zero() {
            tokio::time::sleep(self.config.latency).await;
        }

        if let Err(reason) = check_request(request) {
            warn!(reason = %reason, "Payment not authorized");
            return Err(reason);
        }

        let transaction_id = new_transaction_id();
        info!(transaction_id = %transaction_id, "Payment approved");
        Ok(transaction_id)
    }
}

/// Applies the processor's field checks in order. First failure wins.
pub fn check_request(request: &PaymentRequest) -> Result<(), PaymentError> {
    let card = &request.card;

    if card.number.is_empty() || card.number.chars().count() < MIN_NUMBER_CHARS {
        return Err(PaymentError::InvalidCardNumber);
    }

    if card.expiry.is_empty() || !card.expiry.contains('/') {
        return Err(PaymentError::InvalidExpiry);
    }

    if card.cvv.is_empty() || card.cvv.chars().count() < MIN_CVV_CHARS {
        return Err(PaymentError::InvalidCvv);
    }

    if card.number.ends_with(DECLINE_SUFFIX) {
        return Err(PaymentError::Declined);
    }

    Ok(())
}

fn new_transaction_id() -> String {
    format!("{}{}", TRANSACTION_ID_PREFIX, Uuid::new_v4().simple())
}
