//! Identity types for Tally records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Timestamp type using UTC timezone.
pub type Timestamp = DateTime<Utc>;

/// Request correlation identifier using UUIDv7 for timestamp-sortable IDs.
pub type RequestId = Uuid;

/// Generate a new UUIDv7 request identifier.
pub fn new_request_id() -> RequestId {
    Uuid::now_v7()
}

/// Common behaviour for the string-backed identifiers issued by the backend.
pub trait RecordIdType: Clone + Eq + std::hash::Hash + fmt::Display {
    fn as_str(&self) -> &str;
}

macro_rules! define_record_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }
        }

        impl RecordIdType for $name {
            fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self(value)
            }
        }
    };
}

define_record_id!(
    /// Identifier of a friend in the user's contact list.
    FriendId
);
define_record_id!(
    /// Identifier of a payment card.
    CardId
);
define_record_id!(
    /// Identifier of a money transfer.
    TransferId
);
define_record_id!(
    /// Identifier of an account holder.
    UserId
);
