//! Cache usage statistics.

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Reads answered from the cache.
    pub hits: u64,
    /// Premium reads with no usable entry (none, or owned by another user).
    pub misses: u64,
    /// Premium reads that found an entry past its validity window.
    pub expirations: u64,
    /// Reads and writes skipped because the user is not premium.
    pub bypasses: u64,
    /// Entries written.
    pub writes: u64,
    /// Explicit invalidations.
    pub invalidations: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0) over premium reads.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses + self.expirations;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hit_rate_empty() {
        assert_eq!(CacheStats::default().hit_rate(), 0.0);
    }

    #[test]
    fn test_hit_rate_ignores_bypasses() {
        let stats = CacheStats {
            hits: 3,
            misses: 1,
            bypasses: 10,
            ..CacheStats::default()
        };
        assert_eq!(stats.hit_rate(), 0.75);
    }
}
