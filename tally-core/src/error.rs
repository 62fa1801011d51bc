//! Error types for Tally operations

use crate::RecordKind;
use thiserror::Error;

/// Data source failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FetchError {
    #[error("Fetching {kind} failed: {reason}")]
    Failed { kind: RecordKind, reason: String },

    #[error("Transient failure fetching {kind} on call {call}")]
    Transient { kind: RecordKind, call: u64 },

    #[error("Scripted source for {kind} has no result for call {call}")]
    ScriptExhausted { kind: RecordKind, call: u64 },
}

impl FetchError {
    pub fn kind(&self) -> RecordKind {
        match self {
            FetchError::Failed { kind, .. }
            | FetchError::Transient { kind, .. }
            | FetchError::ScriptExhausted { kind, .. } => *kind,
        }
    }
}

/// Cache layer errors. Never fatal: callers treat them as a miss.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("Cache unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Selection errors raised by the list presenter.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SelectionError {
    #[error("Selection index {index} is out of range for {len} rows")]
    Stale { index: usize, len: usize },

    #[error("Row {index} is not selectable")]
    NotSelectable { index: usize },
}

/// Configuration errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for {field}: {value} - {reason}")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },
}

/// Master error type for all Tally errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TallyError {
    #[error("Fetch failed: {0}")]
    FetchFailed(#[from] FetchError),

    #[error("Cache unavailable: {0}")]
    CacheUnavailable(#[from] CacheError),

    #[error("Stale selection: {0}")]
    StaleSelection(#[from] SelectionError),

    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
}

/// Result type alias for Tally operations.
pub type TallyResult<T> = Result<T, TallyError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display() {
        let err = FetchError::Transient {
            kind: RecordKind::Friend,
            call: 3,
        };
        assert_eq!(format!("{}", err), "Transient failure fetching friends on call 3");
        assert_eq!(err.kind(), RecordKind::Friend);
    }

    #[test]
    fn test_master_error_from_fetch() {
        let err: TallyError = FetchError::Failed {
            kind: RecordKind::Card,
            reason: "timeout".to_string(),
        }
        .into();
        assert!(matches!(err, TallyError::FetchFailed(_)));
        assert!(format!("{}", err).contains("Fetching cards failed: timeout"));
    }

    #[test]
    fn test_master_error_from_cache() {
        let err: TallyError = CacheError::Unavailable {
            reason: "lock poisoned".to_string(),
        }
        .into();
        assert!(matches!(err, TallyError::CacheUnavailable(_)));
    }

    #[test]
    fn test_selection_error_display() {
        let err = SelectionError::Stale { index: 4, len: 2 };
        assert!(format!("{}", err).contains("out of range for 2 rows"));
    }
}
