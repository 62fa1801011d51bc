//! User-scoped, time-bounded cache for the friends list.
//!
//! Holds at most one entry, owned by the user who fetched it. Only premium
//! users read or write it; everyone else bypasses it entirely.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use mockable::Clock;
use tally_core::{CacheConfig, CacheError, Record, User, UserId};

use super::freshness::CacheRead;
use super::stats::CacheStats;

/// The single cached friends list.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub owner: UserId,
    pub records: Vec<Record>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default)]
struct CacheState {
    entry: Option<CacheEntry>,
    stats: CacheStats,
}

/// In-memory friends cache with premium gating and a validity window.
///
/// All access goes through one mutex, so reads and whole-entry
/// replacements are serialized. A poisoned lock surfaces as
/// [`CacheError::Unavailable`], which callers treat as a miss.
pub struct FriendCache {
    state: Mutex<CacheState>,
    config: CacheConfig,
    clock: Arc<dyn Clock + Send + Sync>,
}

impl FriendCache {
    pub fn new(config: CacheConfig, clock: Arc<dyn Clock + Send + Sync>) -> Self {
        Self {
            state: Mutex::new(CacheState::default()),
            config,
            clock,
        }
    }

    /// Get the cache configuration.
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Return the cached friends for `user` if the entry is theirs and still valid.
    ///
    /// An entry whose age has reached the validity window is expired and
    /// dropped.
    pub fn read(&self, user: &User) -> Result<Option<CacheRead<Vec<Record>>>, CacheError> {
        let mut guard = self.lock()?;
        // Reborrow once so `entry` and `stats` borrow disjoint fields.
        let state = &mut *guard;
        if !user.is_premium {
            state.stats.bypasses += 1;
            tracing::debug!(user_id = %user.user_id, "cache bypassed for non-premium user");
            return Ok(None);
        }

        let now = self.clock.utc();
        let window = chrono::Duration::from_std(self.config.validity_window)
            .unwrap_or(chrono::Duration::MAX);

        let Some(entry) = state.entry.as_ref() else {
            state.stats.misses += 1;
            tracing::debug!(user_id = %user.user_id, "cache miss: empty");
            return Ok(None);
        };

        if entry.owner != user.user_id {
            state.stats.misses += 1;
            tracing::debug!(
                user_id = %user.user_id,
                owner = %entry.owner,
                "cache miss: entry belongs to another user"
            );
            return Ok(None);
        }

        let age = now - entry.created_at;
        if age >= window {
            state.entry = None;
            state.stats.expirations += 1;
            tracing::debug!(
                user_id = %user.user_id,
                age_ms = age.num_milliseconds(),
                "cache entry expired"
            );
            return Ok(None);
        }

        let count = entry.records.len();
        let read = CacheRead::from_cache(entry.records.clone(), entry.created_at);
        state.stats.hits += 1;
        tracing::debug!(user_id = %user.user_id, count, "cache hit");
        Ok(Some(read))
    }

    /// Replace the entry with `records`, stamped now.
    ///
    /// Returns `false` without touching the cache when `user` is not premium.
    pub fn write(&self, user: &User, records: Vec<Record>) -> Result<bool, CacheError> {
        let mut state = self.lock()?;
        if !user.is_premium {
            state.stats.bypasses += 1;
            return Ok(false);
        }

        let count = records.len();
        state.entry = Some(CacheEntry {
            owner: user.user_id.clone(),
            records,
            created_at: self.clock.utc(),
        });
        state.stats.writes += 1;
        tracing::debug!(user_id = %user.user_id, count, "cache entry written");
        Ok(true)
    }

    /// Drop the entry unconditionally. Returns whether one existed.
    pub fn invalidate(&self) -> Result<bool, CacheError> {
        let mut state = self.lock()?;
        let existed = state.entry.take().is_some();
        state.stats.invalidations += 1;
        tracing::debug!(existed, "cache invalidated");
        Ok(existed)
    }

    /// Snapshot of the current entry, regardless of premium status or age.
    pub fn peek(&self) -> Result<Option<CacheEntry>, CacheError> {
        Ok(self.lock()?.entry.clone())
    }

    /// Get cache statistics.
    pub fn stats(&self) -> Result<CacheStats, CacheError> {
        Ok(self.lock()?.stats.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, CacheState>, CacheError> {
        self.state.lock().map_err(|_| CacheError::Unavailable {
            reason: "friends cache lock poisoned".to_string(),
        })
    }
}

impl std::fmt::Debug for FriendCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FriendCache")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tally_test_utils::fixtures::friend;
    use tally_test_utils::ManualClock;

    const WINDOW: Duration = Duration::from_secs(300);

    fn clock() -> Arc<ManualClock> {
        Arc::new(ManualClock::at_epoch())
    }

    fn cache(clock: Arc<ManualClock>) -> FriendCache {
        FriendCache::new(
            CacheConfig {
                validity_window: WINDOW,
            },
            clock,
        )
    }

    fn friends(names: &[&str]) -> Vec<Record> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| Record::Friend(friend(&format!("f{}", i + 1), name)))
            .collect()
    }

    fn premium() -> User {
        User::new("u1", "Ada", true)
    }

    #[test]
    fn test_premium_write_then_read_hits() {
        let cache = cache(clock());
        assert!(cache.write(&premium(), friends(&["Ada"])).unwrap());

        let read = cache.read(&premium()).unwrap().unwrap();
        assert!(read.was_cache_hit());
        assert_eq!(read.into_value(), friends(&["Ada"]));
        assert_eq!(cache.stats().unwrap().hits, 1);
    }

    #[test]
    fn test_read_counts_every_outcome() {
        let clock = clock();
        let cache = cache(clock.clone());

        assert!(cache.read(&premium()).unwrap().is_none());
        cache.write(&premium(), friends(&["Ada"])).unwrap();
        assert!(cache.read(&User::new("u9", "Linus", true)).unwrap().is_none());
        assert!(cache.read(&premium()).unwrap().is_some());
        clock.advance(WINDOW);
        assert!(cache.read(&premium()).unwrap().is_none());

        let stats = cache.stats().unwrap();
        assert_eq!(stats.misses, 2);
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.writes, 1);
    }

    #[test]
    fn test_non_premium_never_reads_or_writes() {
        let cache = cache(clock());
        let user = User::new("u2", "Grace", false);

        assert!(!cache.write(&user, friends(&["Ada"])).unwrap());
        assert!(cache.peek().unwrap().is_none());

        cache.write(&User::new("u2", "Grace", true), friends(&["Ada"])).unwrap();
        assert!(cache.read(&user).unwrap().is_none());
        assert_eq!(cache.stats().unwrap().bypasses, 2);
    }

    #[test]
    fn test_entry_expires_exactly_at_window_edge() {
        let clock = clock();
        let cache = cache(clock.clone());
        cache.write(&premium(), friends(&["Ada"])).unwrap();

        clock.advance(WINDOW - Duration::from_millis(1));
        assert!(cache.read(&premium()).unwrap().is_some());

        clock.advance(Duration::from_millis(1));
        assert!(cache.read(&premium()).unwrap().is_none());
        assert!(cache.peek().unwrap().is_none());
        assert_eq!(cache.stats().unwrap().expirations, 1);
    }

    #[test]
    fn test_other_users_entry_is_a_miss() {
        let cache = cache(clock());
        cache.write(&premium(), friends(&["Ada"])).unwrap();

        let other = User::new("u9", "Linus", true);
        assert!(cache.read(&other).unwrap().is_none());
        assert_eq!(cache.stats().unwrap().misses, 1);
    }

    #[test]
    fn test_write_replaces_wholesale_and_restamps() {
        let clock = clock();
        let cache = cache(clock.clone());
        cache.write(&premium(), friends(&["Ada", "Grace"])).unwrap();

        clock.advance(Duration::from_secs(200));
        cache.write(&premium(), friends(&["Linus"])).unwrap();

        clock.advance(Duration::from_secs(200));
        let read = cache.read(&premium()).unwrap().unwrap();
        assert_eq!(read.into_value(), friends(&["Linus"]));
    }

    #[test]
    fn test_invalidate_clears_entry() {
        let cache = cache(clock());
        cache.write(&premium(), friends(&["Ada"])).unwrap();

        assert!(cache.invalidate().unwrap());
        assert!(!cache.invalidate().unwrap());
        assert!(cache.read(&premium()).unwrap().is_none());
        assert_eq!(cache.stats().unwrap().invalidations, 2);
    }

    #[test]
    fn test_poisoned_lock_reports_unavailable() {
        let cache = Arc::new(cache(clock()));
        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _guard = poisoner.state.lock().unwrap();
            panic!("poison the cache lock");
        })
        .join();

        assert!(matches!(
            cache.read(&premium()),
            Err(CacheError::Unavailable { .. })
        ));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use tally_test_utils::generators::{arb_records, arb_user};

        proptest! {
            #[test]
            fn entry_served_only_inside_window(
                elapsed_ms in 0u64..600_000,
                records in arb_records(8),
            ) {
                let clock = clock();
                let cache = cache(clock.clone());
                cache.write(&premium(), records.clone()).unwrap();

                clock.advance(Duration::from_millis(elapsed_ms));
                let read = cache.read(&premium()).unwrap();
                prop_assert_eq!(read.is_some(), Duration::from_millis(elapsed_ms) < WINDOW);
                if let Some(read) = read {
                    prop_assert_eq!(read.into_value(), records);
                }
            }

            #[test]
            fn only_premium_owner_is_served(user in arb_user()) {
                let cache = cache(clock());
                cache.write(&premium(), friends(&["Ada"])).unwrap();

                let hit = cache.read(&user).unwrap().is_some();
                prop_assert_eq!(hit, user.is_premium && user.user_id == premium().user_id);
            }
        }
    }
}
