//! Record-agnostic list presentation.
//!
//! The presenter only ever sees [`RowDescriptor`]s. It has no idea whether a
//! row came from a friend, a card or a transfer; the per-view mapping in
//! [`crate::screens`] resolves that before rows get here.
//!
//! Selection is by index and dispatches the action captured when the rows
//! were set. An index that no longer exists after a replace is a no-op.

use tally_core::{CardId, FriendId, SelectionError, TransferId};

/// Intent emitted when a row is selected. The host performs the transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowAction {
    OpenFriendDetail(FriendId),
    ShowTransferConfirmation(TransferId),
    OpenCardDetail(CardId),
}

/// Display and action projection of one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowDescriptor {
    pub title: String,
    pub subtitle: String,
    /// Short trailing label, e.g. an amount or a badge.
    pub accessory: Option<String>,
    pub selectable: bool,
    pub action: RowAction,
}

/// Events the presenter raises toward its controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterEvent {
    /// The user reached the end of the list; fetch the next batch.
    LoadMore,
}

#[derive(Debug, Clone)]
pub struct ListPresenter {
    rows: Vec<RowDescriptor>,
    cursor: Option<usize>,
    load_more_threshold: usize,
    can_load_more: bool,
    load_more_pending: bool,
}

impl ListPresenter {
    /// `load_more_threshold` is how many rows from the end a row must be
    /// to raise [`PresenterEvent::LoadMore`] when it becomes visible.
    pub fn new(load_more_threshold: usize) -> Self {
        Self {
            rows: Vec::new(),
            cursor: None,
            load_more_threshold,
            can_load_more: false,
            load_more_pending: false,
        }
    }

    /// Replace every displayed row.
    ///
    /// The cursor is kept where it was when still in range, clamped to the
    /// last row otherwise, and cleared for an empty list.
    pub fn set_items(&mut self, rows: Vec<RowDescriptor>) {
        self.rows = rows;
        self.load_more_pending = false;
        self.cursor = match (self.cursor, self.rows.len()) {
            (_, 0) => None,
            (None, _) => Some(0),
            (Some(i), len) => Some(i.min(len - 1)),
        };
    }

    pub fn rows(&self) -> &[RowDescriptor] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn cursor(&self) -> Option<usize> {
        self.cursor
    }

    pub fn selected_row(&self) -> Option<&RowDescriptor> {
        self.cursor.and_then(|i| self.rows.get(i))
    }

    /// Dispatch the action bound to row `index`.
    ///
    /// Stale and non-selectable indices yield `None`.
    pub fn on_select(&self, index: usize) -> Option<RowAction> {
        match self.try_select(index) {
            Ok(action) => Some(action),
            Err(e) => {
                tracing::debug!(error = %e, "selection ignored");
                None
            }
        }
    }

    pub fn try_select(&self, index: usize) -> Result<RowAction, SelectionError> {
        let row = self.rows.get(index).ok_or(SelectionError::Stale {
            index,
            len: self.rows.len(),
        })?;
        if !row.selectable {
            return Err(SelectionError::NotSelectable { index });
        }
        Ok(row.action.clone())
    }

    /// Dispatch the action under the cursor.
    pub fn select_current(&self) -> Option<RowAction> {
        self.cursor.and_then(|i| self.on_select(i))
    }

    /// Move the cursor down, wrapping to the top.
    pub fn move_down(&mut self) -> Option<PresenterEvent> {
        if self.rows.is_empty() {
            return None;
        }
        let next = self.cursor.map_or(0, |i| (i + 1) % self.rows.len());
        self.cursor = Some(next);
        self.on_row_visible(next)
    }

    /// Move the cursor up, wrapping to the bottom.
    pub fn move_up(&mut self) -> Option<PresenterEvent> {
        if self.rows.is_empty() {
            return None;
        }
        let last = self.rows.len() - 1;
        let prev = match self.cursor {
            Some(0) | None => last,
            Some(i) => i - 1,
        };
        self.cursor = Some(prev);
        self.on_row_visible(prev)
    }

    /// Whether the controller has more batches to offer.
    pub fn set_can_load_more(&mut self, can_load_more: bool) {
        self.can_load_more = can_load_more;
    }

    pub fn can_load_more(&self) -> bool {
        self.can_load_more
    }

    pub fn is_load_more_pending(&self) -> bool {
        self.load_more_pending
    }

    /// Report that row `index` is on screen.
    ///
    /// Raises [`PresenterEvent::LoadMore`] once per batch when `index` is
    /// within the threshold of the end. Further triggers are suppressed until
    /// the next [`ListPresenter::set_items`] or [`ListPresenter::reset_load_more`].
    pub fn on_row_visible(&mut self, index: usize) -> Option<PresenterEvent> {
        if !self.can_load_more || self.load_more_pending || index >= self.rows.len() {
            return None;
        }
        if self.rows.len() - index > self.load_more_threshold {
            return None;
        }
        self.load_more_pending = true;
        Some(PresenterEvent::LoadMore)
    }

    /// Re-arm the trigger, e.g. after a batch failed or was superseded.
    pub fn reset_load_more(&mut self) {
        self.load_more_pending = false;
    }
}
