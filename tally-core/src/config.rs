//! Configuration types

use crate::{ConfigError, RecordKind, TallyError, TallyResult};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Retry configuration for data source fetches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Automatic retries after the first attempt. Zero leaves retrying to the user.
    pub max_retries: u32,
    pub initial_backoff: Duration,
    pub max_backoff: Duration,
    pub backoff_multiplier: f64,
}

impl RetryConfig {
    /// No automatic retries; failures surface immediately.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            initial_backoff: Duration::ZERO,
            max_backoff: Duration::ZERO,
            backoff_multiplier: 1.0,
        }
    }

    /// Retry `max_retries` times without waiting between attempts.
    pub fn immediate(max_retries: u32) -> Self {
        Self {
            max_retries,
            ..Self::none()
        }
    }

    /// Delay before retry number `retry` (1-based), capped at `max_backoff`.
    pub fn backoff_for(&self, retry: u32) -> Duration {
        if retry == 0 {
            return Duration::ZERO;
        }
        let factor = self.backoff_multiplier.powi(retry.saturating_sub(1) as i32);
        let millis = self.initial_backoff.as_millis() as f64 * factor;
        let capped = millis.min(self.max_backoff.as_millis() as f64);
        Duration::from_millis(capped.max(0.0) as u64)
    }

    /// Total attempts a single request may make.
    pub fn max_attempts(&self) -> u32 {
        self.max_retries.saturating_add(1)
    }
}

/// Friends cache configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Entries at or beyond this age are expired.
    pub validity_window: Duration,
}

/// Simulated network latency per data source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyConfig {
    pub friends: Duration,
    pub cards: Duration,
    pub transfers: Duration,
}

impl LatencyConfig {
    pub fn zero() -> Self {
        Self {
            friends: Duration::ZERO,
            cards: Duration::ZERO,
            transfers: Duration::ZERO,
        }
    }

    pub fn for_kind(&self, kind: RecordKind) -> Duration {
        match kind {
            RecordKind::Friend => self.friends,
            RecordKind::Card => self.cards,
            RecordKind::Transfer => self.transfers,
        }
    }
}

/// Master fetch configuration.
/// ALL values are required - no defaults anywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FetchConfig {
    pub retry: RetryConfig,
    pub cache: CacheConfig,
    pub latency: LatencyConfig,
    /// Records per page. `None` fetches everything in one request.
    pub page_size: Option<usize>,
}

impl FetchConfig {
    /// The stock values used by the shipped client.
    ///
    /// Centralized here so the binary and tests agree on what "standard" means.
    pub fn standard() -> Self {
        Self {
            retry: RetryConfig {
                max_retries: 3,
                initial_backoff: Duration::from_millis(200),
                max_backoff: Duration::from_secs(2),
                backoff_multiplier: 2.0,
            },
            cache: CacheConfig {
                validity_window: Duration::from_secs(300),
            },
            latency: LatencyConfig {
                friends: Duration::from_millis(1500),
                cards: Duration::from_millis(1000),
                transfers: Duration::from_millis(1200),
            },
            page_size: Some(20),
        }
    }

    /// Validate the configuration.
    /// Returns Ok(()) if valid, Err(TallyError::Config) if invalid.
    ///
    /// Validates:
    /// - cache.validity_window is positive
    /// - retry.backoff_multiplier >= 1.0
    /// - retry.max_backoff >= retry.initial_backoff
    /// - page_size, when set, is positive
    pub fn validate(&self) -> TallyResult<()> {
        if self.cache.validity_window.is_zero() {
            return Err(TallyError::Config(ConfigError::InvalidValue {
                field: "cache.validity_window".to_string(),
                value: format!("{:?}", self.cache.validity_window),
                reason: "validity_window must be positive".to_string(),
            }));
        }

        if self.retry.backoff_multiplier < 1.0 {
            return Err(TallyError::Config(ConfigError::InvalidValue {
                field: "retry.backoff_multiplier".to_string(),
                value: self.retry.backoff_multiplier.to_string(),
                reason: "backoff_multiplier must be >= 1.0".to_string(),
            }));
        }

        if self.retry.max_backoff < self.retry.initial_backoff {
            return Err(TallyError::Config(ConfigError::InvalidValue {
                field: "retry.max_backoff".to_string(),
                value: format!("{:?}", self.retry.max_backoff),
                reason: "max_backoff must be >= initial_backoff".to_string(),
            }));
        }

        if self.page_size == Some(0) {
            return Err(TallyError::Config(ConfigError::InvalidValue {
                field: "page_size".to_string(),
                value: "0".to_string(),
                reason: "page_size must be greater than 0".to_string(),
            }));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_standard_config_is_valid() {
        assert!(FetchConfig::standard().validate().is_ok());
    }

    #[test]
    fn test_latency_is_picked_per_kind() {
        let latency = LatencyConfig {
            friends: Duration::from_millis(10),
            cards: Duration::from_millis(20),
            transfers: Duration::from_millis(30),
        };
        assert_eq!(latency.for_kind(RecordKind::Friend), Duration::from_millis(10));
        assert_eq!(latency.for_kind(RecordKind::Card), Duration::from_millis(20));
        assert_eq!(latency.for_kind(RecordKind::Transfer), Duration::from_millis(30));
        assert_eq!(LatencyConfig::zero().for_kind(RecordKind::Card), Duration::ZERO);
    }

    #[test]
    fn test_zero_validity_window_rejected() {
        let mut config = FetchConfig::standard();
        config.cache.validity_window = Duration::ZERO;
        let err = config.validate().unwrap_err();
        assert!(matches!(err, TallyError::Config(ConfigError::InvalidValue { ref field, .. }) if field == "cache.validity_window"));
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let mut config = FetchConfig::standard();
        config.page_size = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_backoff_grows_and_caps() {
        let retry = FetchConfig::standard().retry;
        assert_eq!(retry.backoff_for(1), Duration::from_millis(200));
        assert_eq!(retry.backoff_for(2), Duration::from_millis(400));
        assert_eq!(retry.backoff_for(3), Duration::from_millis(800));
        assert_eq!(retry.backoff_for(10), Duration::from_secs(2));
        assert_eq!(retry.max_attempts(), 4);
    }

    #[test]
    fn test_no_retry_config() {
        let retry = RetryConfig::none();
        assert_eq!(retry.max_attempts(), 1);
        assert_eq!(retry.backoff_for(1), Duration::ZERO);
    }

    proptest! {
        #[test]
        fn backoff_never_exceeds_max(retry in 0u32..64, initial in 0u64..1_000, extra in 0u64..5_000) {
            let config = RetryConfig {
                max_retries: 5,
                initial_backoff: Duration::from_millis(initial),
                max_backoff: Duration::from_millis(initial + extra),
                backoff_multiplier: 2.0,
            };
            prop_assert!(config.backoff_for(retry) <= config.max_backoff);
        }
    }
}
