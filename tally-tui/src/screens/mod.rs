//! Per-view mapping from records to row descriptors.
//!
//! This is the one place that knows which record kinds exist. Everything
//! downstream of [`describe`] works on [`RowDescriptor`] alone.

pub mod cards;
pub mod friends;
pub mod transfers;

use tally_core::{Record, TransferDirection};

use crate::nav::View;
use crate::presenter::RowDescriptor;

/// Map `record` to the row `view` shows for it.
///
/// Returns `None` for records the view does not list, such as a received
/// transfer on the sent view or a card on the friends view.
pub fn describe(view: View, record: &Record) -> Option<RowDescriptor> {
    match (view, record) {
        (View::Friends, Record::Friend(friend)) => Some(friends::describe(friend)),
        (View::Cards, Record::Card(card)) => Some(cards::describe(card)),
        (View::SentTransfers, Record::Transfer(transfer))
            if transfer.direction == TransferDirection::Sent =>
        {
            Some(transfers::describe(transfer))
        }
        (View::ReceivedTransfers, Record::Transfer(transfer))
            if transfer.direction == TransferDirection::Received =>
        {
            Some(transfers::describe(transfer))
        }
        _ => None,
    }
}
