//! Fetch coordination: cache or source, retries, one terminal result.
//!
//! A [`FetchCoordinator`] owns one [`DataSource`] and, for the friends source
//! only, a reference to the shared [`FriendCache`]. Every call to
//! [`FetchCoordinator::execute`] resolves exactly once, with records or with a
//! [`TallyError::FetchFailed`] after the retry budget is spent.
//!
//! Overlapping requests are independent. Each one that succeeds writes the
//! cache, so the last writer wins. The cache only ever holds whole lists.

use std::sync::Arc;

use tally_core::{
    new_request_id, FetchConfig, Record, RecordKind, RequestId, RetryConfig, TallyError,
    TallyResult, User, UserProvider,
};

use crate::cache::{CacheRead, Freshness, FriendCache};
use crate::source::{DataSource, FetchContext, PageRequest};

/// One "get data for this screen" request.
///
/// Built by [`FetchCoordinator::request`] or [`FetchCoordinator::request_page`],
/// consumed by [`FetchCoordinator::execute`].
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    pub request_id: RequestId,
    pub kind: RecordKind,
    pub freshness: Freshness,
    /// The session user at the moment the request was issued.
    pub user: User,
    pub page: Option<PageRequest>,
}

impl FetchRequest {
    /// Whether this request covers the start of the list.
    ///
    /// Only first-page requests read or write the cache.
    pub fn is_first_page(&self) -> bool {
        self.page.map_or(true, |page| page.offset == 0)
    }
}

/// Chooses between cache and source and applies the retry policy.
pub struct FetchCoordinator {
    source: Arc<dyn DataSource>,
    cache: Option<Arc<FriendCache>>,
    users: Arc<dyn UserProvider>,
    retry: RetryConfig,
    page_size: Option<usize>,
}

impl FetchCoordinator {
    pub fn new(
        source: Arc<dyn DataSource>,
        users: Arc<dyn UserProvider>,
        config: &FetchConfig,
    ) -> Self {
        Self {
            source,
            cache: None,
            users,
            retry: config.retry.clone(),
            page_size: config.page_size,
        }
    }

    /// Attach the friends cache.
    ///
    /// Ignored for any other source kind.
    pub fn with_cache(mut self, cache: Arc<FriendCache>) -> Self {
        if self.source.kind() == RecordKind::Friend {
            self.cache = Some(cache);
        } else {
            tracing::warn!(
                kind = %self.source.kind(),
                "cache attached to a non-friends source; ignoring"
            );
        }
        self
    }

    pub fn kind(&self) -> RecordKind {
        self.source.kind()
    }

    pub fn page_size(&self) -> Option<usize> {
        self.page_size
    }

    pub fn retry_config(&self) -> &RetryConfig {
        &self.retry
    }

    pub fn cache(&self) -> Option<&Arc<FriendCache>> {
        self.cache.as_ref()
    }

    /// Build a first-page request for the current session user.
    pub fn request(&self, force: bool) -> FetchRequest {
        FetchRequest {
            request_id: new_request_id(),
            kind: self.kind(),
            freshness: Freshness::from_force(force),
            user: self.users.current_user(),
            page: self.page_size.map(PageRequest::first),
        }
    }

    /// Build a request for the page starting at `offset`.
    ///
    /// Follow-up pages always go to the source.
    pub fn request_page(&self, offset: usize) -> FetchRequest {
        FetchRequest {
            request_id: new_request_id(),
            kind: self.kind(),
            freshness: Freshness::Fresh,
            user: self.users.current_user(),
            page: self.page_size.map(|limit| PageRequest { offset, limit }),
        }
    }

    /// Load the first page, from the cache when allowed.
    pub async fn load(&self, force: bool) -> TallyResult<CacheRead<Vec<Record>>> {
        self.execute(self.request(force)).await
    }

    /// Load the page starting at `offset`.
    pub async fn load_more(&self, offset: usize) -> TallyResult<CacheRead<Vec<Record>>> {
        self.execute(self.request_page(offset)).await
    }

    /// Resolve a request to exactly one terminal result.
    #[tracing::instrument(
        name = "fetch",
        skip(self, request),
        fields(
            request_id = %request.request_id,
            kind = %request.kind,
            force = request.freshness.is_fresh(),
            offset = request.page.map(|p| p.offset),
        )
    )]
    pub async fn execute(&self, request: FetchRequest) -> TallyResult<CacheRead<Vec<Record>>> {
        let cache = self.cache.as_ref().filter(|_| request.is_first_page());

        if let (Some(cache), Freshness::BestEffort) = (cache, request.freshness) {
            match cache.read(&request.user) {
                Ok(Some(read)) => {
                    tracing::debug!(count = read.value().len(), "served from cache");
                    return Ok(read);
                }
                Ok(None) => {}
                Err(e) => tracing::warn!(error = %e, "cache read failed; treating as miss"),
            }
        }

        let max_attempts = self.retry.max_attempts();
        let mut attempt = 1;
        loop {
            let context = FetchContext {
                request_id: request.request_id,
                user: request.user.clone(),
                page: request.page,
                attempt,
            };

            match self.source.fetch(&context).await {
                Ok(records) => {
                    tracing::debug!(attempt, count = records.len(), "source fetch succeeded");
                    if let Some(cache) = cache {
                        match cache.write(&request.user, records.clone()) {
                            Ok(true) => tracing::debug!("wrote through to cache"),
                            Ok(false) => {}
                            Err(e) => tracing::warn!(error = %e, "cache write failed; skipping"),
                        }
                    }
                    return Ok(CacheRead::from_source(records, attempt));
                }
                Err(e) if attempt < max_attempts => {
                    let backoff = self.retry.backoff_for(attempt);
                    tracing::warn!(
                        attempt,
                        max_attempts,
                        backoff_ms = backoff.as_millis() as u64,
                        error = %e,
                        "source fetch failed; retrying"
                    );
                    if !backoff.is_zero() {
                        tokio::time::sleep(backoff).await;
                    }
                    attempt += 1;
                }
                Err(e) => {
                    tracing::warn!(attempt, error = %e, "source fetch failed; giving up");
                    return Err(TallyError::FetchFailed(e));
                }
            }
        }
    }

    /// Drop the cached friends list, if this coordinator has a cache.
    pub fn invalidate(&self) -> bool {
        let Some(cache) = &self.cache else {
            return false;
        };
        match cache.invalidate() {
            Ok(existed) => existed,
            Err(e) => {
                tracing::warn!(error = %e, "cache invalidation failed");
                false
            }
        }
    }
}

impl std::fmt::Debug for FetchCoordinator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FetchCoordinator")
            .field("kind", &self.kind())
            .field("cached", &self.cache.is_some())
            .field("retry", &self.retry)
            .field("page_size", &self.page_size)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::ScriptedSource;
    use chrono::{Local, Utc};
    use mockable::{Clock, DefaultClock};
    use std::time::Duration;
    use tally_core::{FetchError, FixedUser, SessionUser};
    use tally_test_utils::assertions::{assert_fetch_failed, assert_ok};
    use tally_test_utils::fixtures::{self, card, fast_config as config, free_user, premium_user};

    fn ada() -> Record {
        Record::Friend(fixtures::ada())
    }

    fn friend_cache() -> Arc<FriendCache> {
        Arc::new(FriendCache::new(
            config(0).cache,
            Arc::new(DefaultClock),
        ))
    }

    fn coordinator(
        source: Arc<ScriptedSource>,
        user: User,
        max_retries: u32,
    ) -> FetchCoordinator {
        FetchCoordinator::new(source, Arc::new(FixedUser(user)), &config(max_retries))
            .with_cache(friend_cache())
    }

    #[tokio::test]
    async fn test_premium_second_load_served_from_cache() {
        let source = Arc::new(ScriptedSource::succeeding(RecordKind::Friend, vec![ada()]));
        let coordinator = coordinator(source.clone(), premium_user(), 0);

        let first = coordinator.load(false).await.unwrap();
        let second = coordinator.load(false).await.unwrap();

        assert!(first.was_cache_miss());
        assert!(second.was_cache_hit());
        assert_eq!(first.value(), second.value());
        assert_eq!(source.calls(), 1);
    }

    #[tokio::test]
    async fn test_non_premium_always_hits_source() {
        let source = Arc::new(ScriptedSource::succeeding(RecordKind::Friend, vec![ada()]));
        let coordinator = coordinator(source.clone(), User::new("u2", "Grace", false), 0);

        for _ in 0..3 {
            assert!(coordinator.load(false).await.unwrap().was_cache_miss());
        }
        assert_eq!(source.calls(), 3);
        assert!(coordinator.cache().unwrap().peek().unwrap().is_none());
    }

    #[tokio::test]
    async fn test_force_bypasses_and_overwrites_cache() {
        let source = Arc::new(ScriptedSource::from_fn(RecordKind::Friend, |call| {
            Ok(vec![Record::Friend(fixtures::friend(
                &format!("f{call}"),
                &format!("Friend {call}"),
            ))])
        }));
        let coordinator = coordinator(source.clone(), premium_user(), 0);

        coordinator.load(false).await.unwrap();
        let forced = coordinator.load(true).await.unwrap();
        assert!(forced.was_cache_miss());
        assert_eq!(source.calls(), 2);

        let cached = coordinator.load(false).await.unwrap();
        assert!(cached.was_cache_hit());
        assert_eq!(cached.value(), forced.value());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_fail_once_then_succeed_takes_two_calls() {
        let source = Arc::new(ScriptedSource::from_results(
            RecordKind::Friend,
            vec![
                Err(FetchError::Failed {
                    kind: RecordKind::Friend,
                    reason: "timeout".to_string(),
                }),
                Ok(vec![ada()]),
            ],
        ));
        let coordinator = coordinator(source.clone(), premium_user(), 1);

        let result = coordinator.load(false).await;
        assert_ok(&result);
        assert_eq!(result.unwrap().into_value(), vec![ada()]);
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_exhausted_retries_surface_failure() {
        let source = Arc::new(ScriptedSource::failing(RecordKind::Friend, "offline"));
        let coordinator = coordinator(source.clone(), premium_user(), 2);

        let result = coordinator.load(false).await;
        assert_fetch_failed(&result);
        assert!(matches!(
            result.unwrap_err(),
            TallyError::FetchFailed(FetchError::Failed { .. })
        ));
        assert_eq!(source.calls(), 3);
        assert!(coordinator.cache().unwrap().peek().unwrap().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_retries_wait_for_backoff() {
        let source = Arc::new(ScriptedSource::from_fn(RecordKind::Card, |call| {
            if call < 3 {
                Err(FetchError::Transient {
                    kind: RecordKind::Card,
                    call,
                })
            } else {
                Ok(vec![])
            }
        }));
        let mut config = config(3);
        config.retry = RetryConfig {
            max_retries: 3,
            initial_backoff: Duration::from_millis(100),
            max_backoff: Duration::from_secs(1),
            backoff_multiplier: 2.0,
        };
        let coordinator = FetchCoordinator::new(
            source.clone(),
            Arc::new(FixedUser(premium_user())),
            &config,
        );

        let started = tokio::time::Instant::now();
        let read = coordinator.load(false).await.unwrap();
        assert_eq!(read.attempts(), 3);
        assert!(started.elapsed() >= Duration::from_millis(300));
    }

    #[tokio::test]
    async fn test_cache_ignored_for_other_kinds() {
        let source = Arc::new(ScriptedSource::succeeding(
            RecordKind::Card,
            vec![Record::Card(card("c1", "0005"))],
        ));
        let coordinator = coordinator(source.clone(), premium_user(), 0);

        assert!(coordinator.cache().is_none());
        coordinator.load(false).await.unwrap();
        coordinator.load(false).await.unwrap();
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_load_more_never_touches_cache() {
        let records = fixtures::friends(5);
        let source = Arc::new(ScriptedSource::succeeding(RecordKind::Friend, records.clone()));
        let mut config = config(0);
        config.page_size = Some(2);
        let coordinator = FetchCoordinator::new(
            source.clone(),
            Arc::new(FixedUser(premium_user())),
            &config,
        )
        .with_cache(friend_cache());

        let first = coordinator.load(false).await.unwrap().into_value();
        assert_eq!(first, records[..2].to_vec());

        let next = coordinator.load_more(2).await.unwrap().into_value();
        assert_eq!(next, records[2..4].to_vec());

        let entry = coordinator.cache().unwrap().peek().unwrap().unwrap();
        assert_eq!(entry.records, records[..2].to_vec());
        assert_eq!(source.calls(), 2);
    }

    #[tokio::test]
    async fn test_session_change_reads_new_user() {
        let session = Arc::new(SessionUser::new(premium_user()));
        let source = Arc::new(ScriptedSource::succeeding(RecordKind::Friend, vec![ada()]));
        let coordinator = FetchCoordinator::new(source.clone(), session.clone(), &config(0))
            .with_cache(friend_cache());

        coordinator.load(false).await.unwrap();
        session.replace(free_user());
        assert!(coordinator.load(false).await.unwrap().was_cache_miss());
        assert_eq!(source.calls(), 2);
    }

    /// Panics whenever it is read, which poisons the cache lock mid-write.
    struct BrokenClock;

    impl Clock for BrokenClock {
        fn local(&self) -> chrono::DateTime<Local> {
            self.utc().with_timezone(&Local)
        }

        fn utc(&self) -> chrono::DateTime<Utc> {
            panic!("clock unavailable");
        }
    }

    #[tokio::test]
    async fn test_unavailable_cache_is_a_miss() {
        let cache = Arc::new(FriendCache::new(config(0).cache, Arc::new(BrokenClock)));
        let poisoner = Arc::clone(&cache);
        let _ = std::thread::spawn(move || {
            let _ = poisoner.write(&premium_user(), vec![]);
        })
        .join();
        assert!(cache.peek().is_err());

        let source = Arc::new(ScriptedSource::succeeding(RecordKind::Friend, vec![ada()]));
        let coordinator = FetchCoordinator::new(
            source.clone(),
            Arc::new(FixedUser(premium_user())),
            &config(0),
        )
        .with_cache(cache);

        let read = coordinator.load(false).await.unwrap();
        assert_eq!(read.into_value(), vec![ada()]);
    }
}
