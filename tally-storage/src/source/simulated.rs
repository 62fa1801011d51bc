//! In-process sources that imitate a remote service.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tally_core::{FetchError, Record, RecordKind};

use super::{catalog, DataSource, FetchContext};

/// A source that waits a fixed latency and then answers from a fixed record list.
///
/// Optionally fails every `fail_every`-th call with [`FetchError::Transient`],
/// which lets the retry path be exercised in a running client.
#[derive(Debug)]
pub struct SimulatedSource {
    kind: RecordKind,
    records: Vec<Record>,
    latency: Duration,
    fail_every: Option<u64>,
    calls: AtomicU64,
}

impl SimulatedSource {
    pub fn new(kind: RecordKind, records: Vec<Record>, latency: Duration) -> Self {
        Self {
            kind,
            records,
            latency,
            fail_every: None,
            calls: AtomicU64::new(0),
        }
    }

    pub fn friends(latency: Duration) -> Self {
        Self::new(RecordKind::Friend, catalog::friends(), latency)
    }

    pub fn cards(latency: Duration) -> Self {
        Self::new(RecordKind::Card, catalog::cards(), latency)
    }

    pub fn transfers(latency: Duration) -> Self {
        Self::new(RecordKind::Transfer, catalog::transfers(), latency)
    }

    /// Fail deterministically on every `n`-th call. `None` or `Some(0)` never fails.
    pub fn with_fail_every(mut self, n: Option<u64>) -> Self {
        self.fail_every = n.filter(|n| *n > 0);
        self
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DataSource for SimulatedSource {
    fn kind(&self) -> RecordKind {
        self.kind
    }

    async fn fetch(&self, context: &FetchContext) -> Result<Vec<Record>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!(
            kind = %self.kind,
            call,
            attempt = context.attempt,
            latency_ms = self.latency.as_millis() as u64,
            "simulated fetch started"
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        if let Some(n) = self.fail_every {
            if call % n == 0 {
                return Err(FetchError::Transient {
                    kind: self.kind,
                    call,
                });
            }
        }

        Ok(context.paginate(&self.records))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::PageRequest;
    use tally_core::{new_request_id, User};

    fn context(page: Option<PageRequest>) -> FetchContext {
        FetchContext {
            request_id: new_request_id(),
            user: User::new("u1", "Ada", true),
            page,
            attempt: 1,
        }
    }

    #[tokio::test]
    async fn test_returns_catalog_page() {
        let source = SimulatedSource::friends(Duration::ZERO);
        let records = source
            .fetch(&context(Some(PageRequest::first(5))))
            .await
            .unwrap();
        assert_eq!(records.len(), 5);
        assert_eq!(records, catalog::friends()[..5].to_vec());
    }

    #[tokio::test]
    async fn test_fails_every_nth_call() {
        let source = SimulatedSource::cards(Duration::ZERO).with_fail_every(Some(2));
        assert!(source.fetch(&context(None)).await.is_ok());
        assert_eq!(
            source.fetch(&context(None)).await,
            Err(FetchError::Transient {
                kind: RecordKind::Card,
                call: 2
            })
        );
        assert!(source.fetch(&context(None)).await.is_ok());
        assert_eq!(source.calls(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn test_waits_for_latency() {
        let source = SimulatedSource::transfers(Duration::from_millis(1200));
        let started = tokio::time::Instant::now();
        source.fetch(&context(None)).await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(1200));
    }

    #[test]
    fn test_zero_cadence_never_fails() {
        let source = SimulatedSource::friends(Duration::ZERO).with_fail_every(Some(0));
        assert!(source.fail_every.is_none());
    }
}
