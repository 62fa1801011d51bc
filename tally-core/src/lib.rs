//! Tally Core - Record Types
//!
//! Pure data structures with no I/O. All other crates depend on this.
//! This crate contains the record model, the session user seam, fetch
//! configuration and the error taxonomy.

pub mod config;
pub mod entities;
pub mod error;
pub mod identity;
pub mod user;

pub use config::{CacheConfig, FetchConfig, LatencyConfig, RetryConfig};
pub use entities::{Card, CardBrand, Friend, Record, RecordKind, Transfer, TransferDirection};
pub use error::{CacheError, ConfigError, FetchError, SelectionError, TallyError, TallyResult};
pub use identity::{
    new_request_id, CardId, FriendId, RecordIdType, RequestId, Timestamp, TransferId, UserId,
};
pub use user::{FixedUser, SessionUser, User, UserProvider};
