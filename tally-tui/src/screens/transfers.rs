use tally_core::{Transfer, TransferDirection};

use crate::presenter::{RowAction, RowDescriptor};

pub fn describe(transfer: &Transfer) -> RowDescriptor {
    let preposition = match transfer.direction {
        TransferDirection::Sent => "To",
        TransferDirection::Received => "From",
    };
    let date = transfer.created_at.format("%b %d");
    let subtitle = match &transfer.memo {
        Some(memo) => format!("{date} · {memo}"),
        None => date.to_string(),
    };
    RowDescriptor {
        title: format!("{preposition} {}", transfer.counterparty),
        subtitle,
        accessory: Some(transfer.amount_label()),
        selectable: true,
        action: RowAction::ShowTransferConfirmation(transfer.transfer_id.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_test_utils::fixtures;

    #[test]
    fn test_received_transfer_row() {
        let mut transfer = fixtures::transfer("t7", TransferDirection::Received, 1250);
        transfer.memo = Some("Lunch".to_string());

        let row = describe(&transfer);
        assert_eq!(row.title, "From Grace");
        assert!(row.subtitle.ends_with("· Lunch"));
        assert_eq!(row.accessory.as_deref(), Some("12.50 USD"));
        assert_eq!(row.action, RowAction::ShowTransferConfirmation("t7".into()));
    }
}
