//! Builds an [`App`] from configuration.
//!
//! Sources are injectable so tests can drive the full screen stack with
//! scripted data. The friends coordinator is the only one that sees the cache.

use std::sync::Arc;

use mockable::Clock;
use tally_core::{RecordKind, SessionUser, UserProvider};
use tally_storage::{DataSource, FetchCoordinator, FriendCache, SimulatedSource};

use crate::config::TuiConfig;
use crate::controller::ScreenController;
use crate::error::TuiError;
use crate::nav::View;
use crate::state::App;

/// One data source per record kind.
pub struct Sources {
    pub friends: Arc<dyn DataSource>,
    pub cards: Arc<dyn DataSource>,
    pub transfers: Arc<dyn DataSource>,
}

impl Sources {
    /// The built-in catalog with configured latency and failure cadence.
    pub fn simulated(config: &TuiConfig) -> Self {
        let latency = config.fetch_config().latency;
        Self {
            friends: Arc::new(
                SimulatedSource::friends(latency.for_kind(RecordKind::Friend))
                    .with_fail_every(config.failures.friends_every),
            ),
            cards: Arc::new(
                SimulatedSource::cards(latency.for_kind(RecordKind::Card))
                    .with_fail_every(config.failures.cards_every),
            ),
            transfers: Arc::new(
                SimulatedSource::transfers(latency.for_kind(RecordKind::Transfer))
                    .with_fail_every(config.failures.transfers_every),
            ),
        }
    }
}

pub fn build_app(config: TuiConfig, clock: Arc<dyn Clock + Send + Sync>) -> Result<App, TuiError> {
    let sources = Sources::simulated(&config);
    build_app_with_sources(config, clock, sources)
}

pub fn build_app_with_sources(
    config: TuiConfig,
    clock: Arc<dyn Clock + Send + Sync>,
    sources: Sources,
) -> Result<App, TuiError> {
    let fetch = config.fetch_config();
    fetch.validate().map_err(crate::config::ConfigError::from)?;

    let session = Arc::new(SessionUser::new(config.session_user()));
    let users: Arc<dyn UserProvider> = session.clone();
    let cache = Arc::new(FriendCache::new(fetch.cache.clone(), clock));

    let friends = Arc::new(
        FetchCoordinator::new(sources.friends, users.clone(), &fetch).with_cache(cache.clone()),
    );
    let cards = Arc::new(FetchCoordinator::new(sources.cards, users.clone(), &fetch));
    // Sent and received share one source; each screen filters by direction.
    let transfers = Arc::new(FetchCoordinator::new(sources.transfers, users, &fetch));

    let threshold = config.load_more_threshold;
    let screens = View::all()
        .iter()
        .map(|&view| {
            let coordinator = match view.record_kind() {
                RecordKind::Friend => friends.clone(),
                RecordKind::Card => cards.clone(),
                RecordKind::Transfer => transfers.clone(),
            };
            ScreenController::new(view, coordinator, threshold)
        })
        .collect();

    tracing::info!(
        user = %config.user.id,
        premium = config.user.premium,
        page_size = ?fetch.page_size,
        "app wired"
    );
    Ok(App::new(config, session, cache, screens)?)
}
