//! Data sources: the async producers of records, one per record kind.
//!
//! Production code uses [`SimulatedSource`], which sleeps for a fixed latency
//! before answering from an in-memory catalog. Tests substitute
//! [`ScriptedSource`], which answers from a script and never waits unless
//! told to. Both sit behind the same [`DataSource`] trait.

pub mod catalog;
pub mod scripted;
pub mod simulated;

pub use scripted::ScriptedSource;
pub use simulated::SimulatedSource;

use async_trait::async_trait;
use tally_core::{FetchError, Record, RecordKind, RequestId, User};

/// A window into a source's ordered records.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub offset: usize,
    pub limit: usize,
}

impl PageRequest {
    pub fn first(limit: usize) -> Self {
        Self { offset: 0, limit }
    }

    /// Slice `items` down to this page.
    pub fn apply<T: Clone>(&self, items: &[T]) -> Vec<T> {
        items.iter().skip(self.offset).take(self.limit).cloned().collect()
    }
}

/// Everything a source may need to answer one attempt.
#[derive(Debug, Clone)]
pub struct FetchContext {
    pub request_id: RequestId,
    pub user: User,
    pub page: Option<PageRequest>,
    /// 1-based attempt number within the owning request.
    pub attempt: u32,
}

impl FetchContext {
    /// Apply the page window, if any, to a full record list.
    pub fn paginate(&self, records: &[Record]) -> Vec<Record> {
        match self.page {
            Some(page) => page.apply(records),
            None => records.to_vec(),
        }
    }
}

/// Async producer of records for one domain kind.
///
/// Each call to [`DataSource::fetch`] resolves exactly once, with either
/// the records or a [`FetchError`].
#[async_trait]
pub trait DataSource: Send + Sync {
    /// The kind of record this source produces.
    fn kind(&self) -> RecordKind;

    /// Fetch records for the given context.
    async fn fetch(&self, context: &FetchContext) -> Result<Vec<Record>, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_slices() {
        let items: Vec<u32> = (0..10).collect();
        assert_eq!(PageRequest { offset: 8, limit: 5 }.apply(&items), vec![8, 9]);
        assert_eq!(PageRequest::first(3).apply(&items), vec![0, 1, 2]);
        assert!(PageRequest { offset: 20, limit: 5 }.apply(&items).is_empty());
    }
}
