//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};
use tally_core::RecordKind;

/// One tab of the client. Each view owns exactly one screen controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum View {
    Friends,
    SentTransfers,
    ReceivedTransfers,
    Cards,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Friends => "Friends",
            View::SentTransfers => "Sent",
            View::ReceivedTransfers => "Received",
            View::Cards => "Cards",
        }
    }

    /// The record kind this view lists.
    pub fn record_kind(&self) -> RecordKind {
        match self {
            View::Friends => RecordKind::Friend,
            View::SentTransfers | View::ReceivedTransfers => RecordKind::Transfer,
            View::Cards => RecordKind::Card,
        }
    }

    pub fn all() -> &'static [View] {
        &[
            View::Friends,
            View::SentTransfers,
            View::ReceivedTransfers,
            View::Cards,
        ]
    }

    pub fn index(&self) -> usize {
        Self::all()
            .iter()
            .position(|v| v == self)
            .unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let idx = self.index();
        let all = Self::all();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}
