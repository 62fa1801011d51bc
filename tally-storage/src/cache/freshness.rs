//! Freshness contracts for friend list reads.
//!
//! Every load states whether it tolerates cached data, and every delivered
//! result says whether it came from the cache and how old it is.

use chrono::{DateTime, Utc};

/// Freshness requirement for a load.
///
/// Callers "sign the waiver" by choosing [`Freshness::BestEffort`]; a forced
/// refresh uses [`Freshness::Fresh`] and never looks at the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Freshness {
    /// Accept a cached entry that is still inside the cache's validity window.
    #[default]
    BestEffort,

    /// Bypass the cache and go to the data source.
    ///
    /// A successful fetch still writes through, replacing whatever entry
    /// was cached regardless of its age.
    Fresh,
}

impl Freshness {
    /// Map the `force` flag of a load onto a freshness requirement.
    pub fn from_force(force: bool) -> Self {
        if force {
            Self::Fresh
        } else {
            Self::BestEffort
        }
    }

    /// Returns true if this is a Fresh (forced) freshness.
    pub fn is_fresh(&self) -> bool {
        matches!(self, Self::Fresh)
    }
}

/// Result of a load, carrying staleness metadata.
///
/// Keeps callers aware of where the data they render came from.
#[derive(Debug, Clone)]
pub struct CacheRead<T> {
    /// The delivered value.
    value: T,
    /// When this value was cached (or fetched from the source).
    cached_at: DateTime<Utc>,
    /// Whether this was a cache hit or miss.
    was_cache_hit: bool,
    /// Source attempts spent producing the value. Zero for cache hits.
    attempts: u32,
}

impl<T> CacheRead<T> {
    /// Create a new read from a cache hit.
    pub fn from_cache(value: T, cached_at: DateTime<Utc>) -> Self {
        Self {
            value,
            cached_at,
            was_cache_hit: true,
            attempts: 0,
        }
    }

    /// Create a new read from a data source fetch (cache miss or bypass).
    pub fn from_source(value: T, attempts: u32) -> Self {
        Self {
            value,
            cached_at: Utc::now(),
            was_cache_hit: false,
            attempts,
        }
    }

    /// Consume the wrapper and return the underlying value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Get a reference to the underlying value.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Get when this value was cached or fetched.
    pub fn cached_at(&self) -> DateTime<Utc> {
        self.cached_at
    }

    /// Check if this was a cache hit.
    pub fn was_cache_hit(&self) -> bool {
        self.was_cache_hit
    }

    /// Check if this was a cache miss (fetched from the source).
    pub fn was_cache_miss(&self) -> bool {
        !self.was_cache_hit
    }

    /// Data source attempts spent, including retries.
    pub fn attempts(&self) -> u32 {
        self.attempts
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_freshness_from_force() {
        assert!(Freshness::from_force(true).is_fresh());
        assert_eq!(Freshness::from_force(false), Freshness::BestEffort);
        assert_eq!(Freshness::default(), Freshness::BestEffort);
    }

    #[test]
    fn test_cache_read_from_cache() {
        let cached_at = Utc::now();
        let read = CacheRead::from_cache(vec![1, 2, 3], cached_at);

        assert!(read.was_cache_hit());
        assert!(!read.was_cache_miss());
        assert_eq!(read.attempts(), 0);
        assert_eq!(read.value(), &vec![1, 2, 3]);
        assert_eq!(read.cached_at(), cached_at);
    }

    #[test]
    fn test_cache_read_from_source() {
        let read = CacheRead::from_source(42i32, 2);

        assert!(read.was_cache_miss());
        assert_eq!(read.attempts(), 2);
        assert_eq!(read.into_value(), 42);
    }
}
