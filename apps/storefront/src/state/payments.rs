//! # Payments State
//!
//! Holds the card processor used at checkout.

use atelier_payments::{MockProcessor, ProcessorConfig};

use super::ConfigState;

/// Wrapper around the processor for state management.
#[derive(Debug, Clone, Default)]
pub struct PaymentsState {
    processor: MockProcessor,
}

impl PaymentsState {
    pub fn new(config: ProcessorConfig) -> Self {
        PaymentsState {
            processor: MockProcessor::new(config),
        }
    }

    /// Builds the processor from the configured latency.
    pub fn from_config(config: &ConfigState) -> Self {
        Self::new(ProcessorConfig::with_latency_ms(config.payment_latency_ms))
    }

    pub fn processor(&self) -> &MockProcessor {
        &self.processor
    }
}
