//! # Processor Configuration

use std::time::Duration;

/// Default simulated network latency.
pub const DEFAULT_LATENCY_MS: u64 = 1500;

/// Settings for the mock processor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessorConfig {
    /// How long `authorize` waits before answering.
    pub latency: Duration,
}

impl Default for ProcessorConfig {
    fn default() -> Self {
        ProcessorConfig {
            latency: Duration::from_millis(DEFAULT_LATENCY_MS),
        }
    }
}

impl ProcessorConfig {
    /// Config with the given latency in milliseconds.
    pub fn with_latency_ms(ms: u64) -> Self {
        ProcessorConfig {
            latency: Duration::from_millis(ms),
        }
    }

    /// Zero-latency config, for tests.
    pub fn instant() -> Self {
        ProcessorConfig {
            latency: Duration::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        assert_eq!(ProcessorConfig::default().latency, Duration::from_millis(1500));
        assert_eq!(ProcessorConfig::instant().latency, Duration::ZERO);
        assert_eq!(ProcessorConfig::with_latency_ms(20).latency, Duration::from_millis(20));
    }
}
