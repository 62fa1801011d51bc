//! Screen controllers: one per view, binding a coordinator to a presenter.
//!
//! A controller never awaits anything itself. [`ScreenController::request_load`]
//! hands back a [`PendingLoad`] that the event loop runs on a background task;
//! the resulting [`LoadCompletion`] comes back to the loop and is applied with
//! [`ScreenController::apply`]. Every request takes a fresh generation number
//! and only the latest one may touch what the screen shows. Older completions
//! are dropped on arrival, though their cache writes stand.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tally_core::{Record, RequestId, TallyResult};
use tally_storage::{CacheRead, FetchCoordinator, FetchRequest};

use crate::nav::View;
use crate::presenter::{ListPresenter, PresenterEvent, RowAction};
use crate::screens;
use crate::traits::NavigationHost;

/// Why a load was issued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadMode {
    /// First appearance. Cached data is acceptable.
    Initial,
    /// Explicit refresh. Always goes to the source.
    Refresh,
    /// Next batch starting at `offset`.
    More { offset: usize },
}

impl LoadMode {
    fn force(&self) -> bool {
        !matches!(self, LoadMode::Initial)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScreenState {
    Idle,
    Loading,
    Loaded,
    Failed { message: String },
}

impl ScreenState {
    pub fn label(&self) -> &str {
        match self {
            ScreenState::Idle => "idle",
            ScreenState::Loading => "loading",
            ScreenState::Loaded => "loaded",
            ScreenState::Failed { .. } => "failed",
        }
    }
}

/// A request issued by a controller, ready to run off the event loop.
#[derive(Debug)]
pub struct PendingLoad {
    pub view: View,
    pub generation: u64,
    pub mode: LoadMode,
    coordinator: Arc<FetchCoordinator>,
    request: FetchRequest,
}

impl PendingLoad {
    pub fn request_id(&self) -> RequestId {
        self.request.request_id
    }

    /// Resolve the request. Always yields exactly one completion.
    pub async fn run(self) -> LoadCompletion {
        let result = self.coordinator.execute(self.request).await;
        LoadCompletion {
            view: self.view,
            generation: self.generation,
            mode: self.mode,
            result,
        }
    }
}

/// The terminal result of one [`PendingLoad`].
#[derive(Debug)]
pub struct LoadCompletion {
    pub view: View,
    pub generation: u64,
    pub mode: LoadMode,
    pub result: TallyResult<CacheRead<Vec<Record>>>,
}

/// What applying a completion did to the screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    Updated { rows: usize, from_cache: bool },
    Failed { message: String },
    /// A newer request was issued after this one.
    Superseded,
}

pub struct ScreenController {
    view: View,
    coordinator: Arc<FetchCoordinator>,
    presenter: ListPresenter,
    /// Records backing the presenter's rows, index for index.
    records: Vec<Record>,
    /// Raw records received across all pages, before per-view filtering.
    fetched: usize,
    state: ScreenState,
    generation: u64,
    last_mode: Option<LoadMode>,
    from_cache: bool,
    loaded_at: Option<DateTime<Utc>>,
}

impl ScreenController {
    pub fn new(view: View, coordinator: Arc<FetchCoordinator>, load_more_threshold: usize) -> Self {
        Self {
            view,
            coordinator,
            presenter: ListPresenter::new(load_more_threshold),
            records: Vec::new(),
            fetched: 0,
            state: ScreenState::Idle,
            generation: 0,
            last_mode: None,
            from_cache: false,
            loaded_at: None,
        }
    }

    pub fn view(&self) -> View {
        self.view
    }

    pub fn state(&self) -> &ScreenState {
        &self.state
    }

    pub fn presenter(&self) -> &ListPresenter {
        &self.presenter
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn record_at(&self, index: usize) -> Option<&Record> {
        self.records.get(index)
    }

    /// Whether the rows on screen came from the friends cache.
    pub fn from_cache(&self) -> bool {
        self.from_cache
    }

    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_loading_more(&self) -> bool {
        self.presenter.is_load_more_pending()
    }

    /// Load on first appearance. No-op once the screen has been loaded or is loading.
    pub fn appear(&mut self) -> Option<PendingLoad> {
        match self.state {
            ScreenState::Idle => Some(self.request_load(LoadMode::Initial)),
            _ => None,
        }
    }

    /// Explicit refresh: drop any cached list, then force a fetch.
    pub fn refresh(&mut self) -> PendingLoad {
        if self.coordinator.invalidate() {
            tracing::debug!(view = ?self.view, "cache dropped for refresh");
        }
        self.request_load(LoadMode::Refresh)
    }

    /// Forget the current load state so the next [`ScreenController::appear`]
    /// reloads. Completions already in flight are discarded.
    pub fn mark_stale(&mut self) {
        self.generation += 1;
        self.state = ScreenState::Idle;
        self.from_cache = false;
        self.presenter.reset_load_more();
    }

    /// Re-issue the request that failed last. `None` unless the screen is failed.
    pub fn retry(&mut self) -> Option<PendingLoad> {
        if !matches!(self.state, ScreenState::Failed { .. }) {
            return None;
        }
        let mode = self.last_mode.unwrap_or(LoadMode::Initial);
        Some(self.request_load(mode))
    }

    /// Issue a new request, superseding any in flight.
    pub fn request_load(&mut self, mode: LoadMode) -> PendingLoad {
        self.generation += 1;
        self.last_mode = Some(mode);

        let request = match mode {
            LoadMode::Initial | LoadMode::Refresh => {
                self.state = ScreenState::Loading;
                self.presenter.reset_load_more();
                self.coordinator.request(mode.force())
            }
            LoadMode::More { offset } => {
                if matches!(self.state, ScreenState::Failed { .. }) {
                    self.state = ScreenState::Loading;
                }
                self.coordinator.request_page(offset)
            }
        };

        tracing::debug!(
            view = ?self.view,
            generation = self.generation,
            mode = ?mode,
            request_id = %request.request_id,
            "load requested"
        );

        PendingLoad {
            view: self.view,
            generation: self.generation,
            mode,
            coordinator: Arc::clone(&self.coordinator),
            request,
        }
    }

    /// Apply a completion delivered back to the event loop.
    pub fn apply(&mut self, completion: LoadCompletion) -> ApplyOutcome {
        if completion.view != self.view || completion.generation != self.generation {
            tracing::debug!(
                view = ?self.view,
                generation = completion.generation,
                latest = self.generation,
                "discarding superseded completion"
            );
            return ApplyOutcome::Superseded;
        }

        match completion.result {
            Ok(read) => {
                let from_cache = read.was_cache_hit();
                let loaded_at = read.cached_at();
                let page = read.into_value();
                let page_len = page.len();

                if !matches!(completion.mode, LoadMode::More { .. }) {
                    self.records.clear();
                    self.fetched = 0;
                }
                self.fetched += page_len;
                let view = self.view;
                self.records.extend(
                    page.into_iter()
                        .filter(|record| screens::describe(view, record).is_some()),
                );

                let rows = self
                    .records
                    .iter()
                    .filter_map(|record| screens::describe(view, record))
                    .collect();
                self.presenter.set_items(rows);

                let has_more = self
                    .coordinator
                    .page_size()
                    .is_some_and(|limit| page_len == limit);
                self.presenter.set_can_load_more(has_more);

                self.state = ScreenState::Loaded;
                self.from_cache = from_cache;
                self.loaded_at = Some(loaded_at);
                tracing::debug!(
                    view = ?self.view,
                    rows = self.presenter.len(),
                    from_cache,
                    has_more,
                    "screen updated"
                );
                ApplyOutcome::Updated {
                    rows: self.presenter.len(),
                    from_cache,
                }
            }
            Err(e) => {
                let message = e.to_string();
                if matches!(completion.mode, LoadMode::More { .. }) {
                    self.presenter.reset_load_more();
                }
                self.state = ScreenState::Failed {
                    message: message.clone(),
                };
                tracing::warn!(view = ?self.view, error = %message, "screen load failed");
                ApplyOutcome::Failed { message }
            }
        }
    }

    pub fn move_down(&mut self) -> Option<PendingLoad> {
        let event = self.presenter.move_down();
        self.handle_presenter_event(event)
    }

    pub fn move_up(&mut self) -> Option<PendingLoad> {
        let event = self.presenter.move_up();
        self.handle_presenter_event(event)
    }

    /// Report a row as visible; may start the next batch.
    pub fn on_row_visible(&mut self, index: usize) -> Option<PendingLoad> {
        let event = self.presenter.on_row_visible(index);
        self.handle_presenter_event(event)
    }

    fn handle_presenter_event(&mut self, event: Option<PresenterEvent>) -> Option<PendingLoad> {
        match event {
            Some(PresenterEvent::LoadMore) if self.state == ScreenState::Loaded => {
                Some(self.request_load(LoadMode::More {
                    offset: self.fetched,
                }))
            }
            Some(PresenterEvent::LoadMore) => {
                self.presenter.reset_load_more();
                None
            }
            None => None,
        }
    }

    /// Select row `index` and forward its action to the host.
    ///
    /// Returns the dispatched action, or `None` when the index is stale or
    /// the row is not selectable.
    pub fn select(&self, index: usize, host: &mut dyn NavigationHost) -> Option<RowAction> {
        let action = self.presenter.on_select(index)?;
        host.navigate(action.clone());
        Some(action)
    }

    pub fn select_current(&self, host: &mut dyn NavigationHost) -> Option<RowAction> {
        let index = self.presenter.cursor()?;
        self.select(index, host)
    }
}

impl std::fmt::Debug for ScreenController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScreenController")
            .field("view", &self.view)
            .field("state", &self.state)
            .field("generation", &self.generation)
            .field("rows", &self.presenter.len())
            .finish_non_exhaustive()
    }
}
