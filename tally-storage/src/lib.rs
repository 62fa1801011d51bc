//! Tally Storage - Friends Cache, Data Sources and Fetch Coordination
//!
//! Everything between a screen asking for records and those records
//! arriving: the user-scoped friends cache, the [`DataSource`] seam with its
//! simulated and scripted implementations, and the [`FetchCoordinator`] that
//! decides between them.

pub mod cache;
pub mod coordinator;
pub mod source;

pub use cache::{CacheEntry, CacheRead, CacheStats, Freshness, FriendCache};
pub use coordinator::{FetchCoordinator, FetchRequest};
pub use source::{
    catalog, DataSource, FetchContext, PageRequest, ScriptedSource, SimulatedSource,
};
