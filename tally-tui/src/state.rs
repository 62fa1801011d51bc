//! Application state.
//!
//! [`App`] is owned by the event loop and only ever touched from it. Loads
//! leave as [`PendingLoad`]s inside an [`Effect`] and come back as
//! completions through [`App::apply_completion`].

use std::sync::Arc;

use tally_core::{Record, SessionUser, User, UserProvider};
use tally_storage::FriendCache;

use crate::config::TuiConfig;
use crate::controller::{ApplyOutcome, LoadCompletion, PendingLoad, ScreenController, ScreenState};
use crate::keys::Action;
use crate::nav::View;
use crate::notifications::{push_bounded, Notification, NotificationAction, NotificationLevel};
use crate::presenter::RowAction;
use crate::theme::TallyTheme;
use crate::traits::NavigationHost;

/// What the event loop must do after an action.
#[derive(Debug)]
pub enum Effect {
    None,
    Load(PendingLoad),
    Quit,
}

/// Records which detail screen the user asked for.
#[derive(Debug, Default)]
pub struct Navigator {
    pub current: Option<RowAction>,
    pub history: Vec<RowAction>,
}

impl NavigationHost for Navigator {
    fn navigate(&mut self, action: RowAction) {
        tracing::info!(action = ?action, "navigating");
        self.history.push(action.clone());
        self.current = Some(action);
    }
}

pub struct App {
    pub config: TuiConfig,
    pub theme: TallyTheme,
    pub session: Arc<SessionUser>,
    pub cache: Arc<FriendCache>,
    pub active_view: View,
    /// One controller per view, in [`View::all`] order.
    screens: Vec<ScreenController>,
    pub navigator: Navigator,
    pub notifications: Vec<Notification>,
    pub help_visible: bool,
}

impl App {
    /// `screens` must hold one controller per view; missing views are a
    /// programming error reported at startup.
    pub fn new(
        config: TuiConfig,
        session: Arc<SessionUser>,
        cache: Arc<FriendCache>,
        mut screens: Vec<ScreenController>,
    ) -> Result<Self, MissingScreen> {
        screens.sort_by_key(|screen| screen.view().index());
        for (index, view) in View::all().iter().enumerate() {
            if screens.get(index).map(ScreenController::view) != Some(*view) {
                return Err(MissingScreen(*view));
            }
        }
        Ok(Self {
            config,
            theme: TallyTheme::default(),
            session,
            cache,
            active_view: View::Friends,
            screens,
            navigator: Navigator::default(),
            notifications: Vec::new(),
            help_visible: false,
        })
    }

    pub fn screen(&self, view: View) -> &ScreenController {
        &self.screens[view.index()]
    }

    pub fn screen_mut(&mut self, view: View) -> &mut ScreenController {
        &mut self.screens[view.index()]
    }

    pub fn active_screen(&self) -> &ScreenController {
        self.screen(self.active_view)
    }

    pub fn current_user(&self) -> User {
        self.session.current_user()
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        push_bounded(&mut self.notifications, Notification::new(level, message));
    }

    /// Switch to `view`, loading it if this is its first appearance.
    pub fn activate(&mut self, view: View) -> Effect {
        self.active_view = view;
        self.navigator.current = None;
        match self.screen_mut(view).appear() {
            Some(load) => Effect::Load(load),
            None => Effect::None,
        }
    }

    pub fn handle_action(&mut self, action: Action) -> Effect {
        match action {
            Action::Quit => Effect::Quit,
            Action::NextView => self.activate(self.active_view.next()),
            Action::PrevView => self.activate(self.active_view.previous()),
            Action::SwitchView(index) => match View::from_index(index) {
                Some(view) => self.activate(view),
                None => Effect::None,
            },
            Action::MoveDown => into_effect(self.screen_mut(self.active_view).move_down()),
            Action::MoveUp => into_effect(self.screen_mut(self.active_view).move_up()),
            Action::Select => {
                let screen = &self.screens[self.active_view.index()];
                screen.select_current(&mut self.navigator);
                Effect::None
            }
            Action::Refresh => {
                self.dismiss_retry(self.active_view);
                Effect::Load(self.screen_mut(self.active_view).refresh())
            }
            Action::Retry => self.retry(),
            Action::TogglePremium => self.toggle_premium(),
            Action::OpenHelp => {
                self.help_visible = !self.help_visible;
                Effect::None
            }
            Action::Cancel => {
                if self.help_visible {
                    self.help_visible = false;
                } else if self.navigator.current.take().is_none() {
                    self.notifications.pop();
                }
                Effect::None
            }
        }
    }

    /// Run the retry attached to the latest notification, or retry the
    /// active screen if it is failed.
    pub fn retry(&mut self) -> Effect {
        let view = self
            .notifications
            .iter()
            .rev()
            .find_map(|n| match n.action {
                Some(NotificationAction::Retry(view)) => Some(view),
                None => None,
            })
            .unwrap_or(self.active_view);

        self.dismiss_retry(view);
        match self.screen_mut(view).retry() {
            Some(load) => {
                tracing::info!(view = ?view, "manual retry");
                Effect::Load(load)
            }
            None => Effect::None,
        }
    }

    /// Flip the session user's premium flag, drop the friends cache, reload
    /// the active screen and mark the others for reload on next visit.
    pub fn toggle_premium(&mut self) -> Effect {
        let mut user = self.session.current_user();
        user.is_premium = !user.is_premium;
        let is_premium = user.is_premium;
        self.session.replace(user);

        match self.cache.invalidate() {
            Ok(existed) => tracing::info!(is_premium, existed, "session changed; cache invalidated"),
            Err(e) => tracing::warn!(error = %e, "cache invalidation failed on session change"),
        }

        // Every other screen was loaded for the previous session.
        let active = self.active_view;
        for screen in self.screens.iter_mut().filter(|s| s.view() != active) {
            screen.mark_stale();
        }

        let label = if is_premium { "Premium enabled" } else { "Premium disabled" };
        self.notify(NotificationLevel::Info, label);
        Effect::Load(self.screen_mut(self.active_view).refresh())
    }

    /// Hand a finished load to its screen.
    pub fn apply_completion(&mut self, completion: LoadCompletion) -> ApplyOutcome {
        let view = completion.view;
        let outcome = self.screen_mut(view).apply(completion);
        match &outcome {
            ApplyOutcome::Failed { message } => {
                self.dismiss_retry(view);
                push_bounded(&mut self.notifications, Notification::load_failed(view, message));
            }
            ApplyOutcome::Updated { .. } => self.dismiss_retry(view),
            ApplyOutcome::Superseded => {}
        }
        outcome
    }

    fn dismiss_retry(&mut self, view: View) {
        self.notifications.retain(|n| !n.is_retry_for(view));
    }

    /// The record behind the detail the user opened, if it is still listed.
    pub fn detail_record(&self) -> Option<&Record> {
        let wanted = match self.navigator.current.as_ref()? {
            RowAction::OpenFriendDetail(id) => id.to_string(),
            RowAction::ShowTransferConfirmation(id) => id.to_string(),
            RowAction::OpenCardDetail(id) => id.to_string(),
        };
        self.active_screen()
            .records()
            .iter()
            .find(|record| record.record_id() == wanted)
    }

    /// Short status for the header.
    pub fn status_line(&self) -> String {
        let screen = self.active_screen();
        let mut status = screen.state().label().to_string();
        if screen.state() == &ScreenState::Loaded && screen.from_cache() {
            status.push_str(" (cached)");
        }
        if screen.is_loading_more() {
            status.push_str(" +more");
        }
        status
    }
}

fn into_effect(load: Option<PendingLoad>) -> Effect {
    match load {
        Some(load) => Effect::Load(load),
        None => Effect::None,
    }
}

#[derive(Debug, thiserror::Error)]
#[error("No screen controller registered for the {0:?} view")]
pub struct MissingScreen(pub View);
