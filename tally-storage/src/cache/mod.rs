//! Friends cache with explicit freshness contracts.
//!
//! Traditional caches hide their staleness, leading to subtle bugs. This module
//! makes staleness explicit: every load states its tolerance via [`Freshness`],
//! and delivered results are wrapped in [`CacheRead<T>`], which records whether
//! the data came from the cache and when it was produced.
//!
//! # User Scoping
//!
//! [`FriendCache`] holds a single entry tagged with the user that fetched it.
//! Non-premium users never read or write it, and an entry is never served to
//! anyone but its owner.
//!
//! # Example
//!
//! ```ignore
//! let cache = FriendCache::new(config.cache.clone(), Arc::new(DefaultClock));
//! cache.write(&user, records)?;
//!
//! if let Some(read) = cache.read(&user)? {
//!     assert!(read.was_cache_hit());
//! }
//! ```

pub mod freshness;
pub mod friend_cache;
pub mod stats;

pub use freshness::{CacheRead, Freshness};
pub use friend_cache::{CacheEntry, FriendCache};
pub use stats::CacheStats;
