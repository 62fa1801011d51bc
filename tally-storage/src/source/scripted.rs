//! Deterministic data source for tests.

use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tally_core::{FetchError, Record, RecordKind};

use super::{DataSource, FetchContext};

type FetchResult = Result<Vec<Record>, FetchError>;
type ResultFn = Box<dyn Fn(u64) -> FetchResult + Send + Sync>;
type LatencyFn = Box<dyn Fn(u64) -> Duration + Send + Sync>;

enum Script {
    /// The same result on every call.
    Repeating(FetchResult),
    /// One result per call, in order.
    Queue(Mutex<VecDeque<FetchResult>>),
    /// A result computed from the 1-based call number.
    Function(ResultFn),
}

/// In-memory source that answers from a script instead of a catalog.
///
/// Calls are counted from 1. A queue that runs dry answers
/// [`FetchError::ScriptExhausted`]. Latency defaults to zero and can be set
/// per call, which is how tests make an earlier request finish after a
/// later one.
pub struct ScriptedSource {
    kind: RecordKind,
    script: Script,
    latency: LatencyFn,
    calls: AtomicU64,
}

impl ScriptedSource {
    fn with_script(kind: RecordKind, script: Script) -> Self {
        Self {
            kind,
            script,
            latency: Box::new(|_| Duration::ZERO),
            calls: AtomicU64::new(0),
        }
    }

    /// Succeed with `records` on every call.
    pub fn succeeding(kind: RecordKind, records: Vec<Record>) -> Self {
        Self::repeating(kind, Ok(records))
    }

    /// Fail with [`FetchError::Failed`] on every call.
    pub fn failing(kind: RecordKind, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        Self::repeating(kind, Err(FetchError::Failed { kind, reason }))
    }

    pub fn repeating(kind: RecordKind, result: FetchResult) -> Self {
        Self::with_script(kind, Script::Repeating(result))
    }

    /// Answer each call with the next queued result.
    pub fn from_results(kind: RecordKind, results: impl IntoIterator<Item = FetchResult>) -> Self {
        Self::with_script(kind, Script::Queue(Mutex::new(results.into_iter().collect())))
    }

    /// Compute each answer from the call number.
    pub fn from_fn<F>(kind: RecordKind, f: F) -> Self
    where
        F: Fn(u64) -> FetchResult + Send + Sync + 'static,
    {
        Self::with_script(kind, Script::Function(Box::new(f)))
    }

    /// Wait `latency` before every answer.
    pub fn with_latency(self, latency: Duration) -> Self {
        self.with_latency_fn(move |_| latency)
    }

    /// Wait a per-call latency before answering.
    pub fn with_latency_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(u64) -> Duration + Send + Sync + 'static,
    {
        self.latency = Box::new(f);
        self
    }

    /// Number of fetches started so far.
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::SeqCst)
    }

    fn answer(&self, call: u64) -> FetchResult {
        match &self.script {
            Script::Repeating(result) => result.clone(),
            Script::Queue(queue) => {
                let mut queue = match queue.lock() {
                    Ok(guard) => guard,
                    Err(poisoned) => poisoned.into_inner(),
                };
                queue.pop_front().unwrap_or(Err(FetchError::ScriptExhausted {
                    kind: self.kind,
                    call,
                }))
            }
            Script::Function(f) => f(call),
        }
    }
}

#[async_trait]
impl DataSource for ScriptedSource {
    fn kind(&self) -> RecordKind {
        self.kind
    }

    async fn fetch(&self, context: &FetchContext) -> Result<Vec<Record>, FetchError> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst) + 1;
        let latency = (self.latency)(call);
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
        self.answer(call).map(|records| context.paginate(&records))
    }
}

impl fmt::Debug for ScriptedSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let script = match self.script {
            Script::Repeating(_) => "repeating",
            Script::Queue(_) => "queue",
            Script::Function(_) => "function",
        };
        f.debug_struct("ScriptedSource")
            .field("kind", &self.kind)
            .field("script", &script)
            .field("calls", &self.calls())
            .finish()
    }
}
