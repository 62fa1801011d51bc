//! Detail overlay for the row the user opened.

use crate::state::App;
use crate::theme::transfer_direction_color;
use crate::widgets::DetailPanel;
use ratatui::{layout::Rect, style::Style, Frame};
use tally_core::{Record, TransferDirection};

pub fn render(f: &mut Frame<'_>, app: &App, area: Rect) {
    let Some(record) = app.detail_record() else {
        let panel = DetailPanel {
            title: "Details",
            fields: vec![("Status", "No longer listed".to_string())],
            style: Style::default().fg(app.theme.warning),
            overlay: true,
        };
        panel.render(f, area);
        return;
    };

    let (title, fields, color) = match record {
        Record::Friend(friend) => (
            "Friend",
            vec![
                ("Name", friend.name.clone()),
                ("Handle", format!("@{}", friend.handle)),
                ("Premium", if friend.is_premium { "yes" } else { "no" }.to_string()),
                ("Added", friend.added_at.format("%Y-%m-%d").to_string()),
            ],
            app.theme.primary,
        ),
        Record::Transfer(transfer) => (
            "Confirm transfer",
            vec![
                (
                    match transfer.direction {
                        TransferDirection::Sent => "To",
                        TransferDirection::Received => "From",
                    },
                    transfer.counterparty.clone(),
                ),
                ("Amount", transfer.amount_label()),
                ("Memo", transfer.memo.clone().unwrap_or_else(|| "-".to_string())),
                ("Date", transfer.created_at.to_rfc3339()),
                ("Reference", transfer.transfer_id.to_string()),
            ],
            transfer_direction_color(transfer.direction, &app.theme),
        ),
        Record::Card(card) => (
            "Card",
            vec![
                ("Brand", card.brand.to_string()),
                ("Number", format!("•••• •••• •••• {}", card.last_four)),
                ("Holder", card.holder_name.clone()),
                ("Expires", card.expiry_label()),
            ],
            app.theme.secondary,
        ),
    };

    let panel = DetailPanel {
        title,
        fields,
        style: Style::default().fg(color),
        overlay: true,
    };
    panel.render(f, area);
}
