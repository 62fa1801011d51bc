use tally_core::Card;

use crate::presenter::{RowAction, RowDescriptor};

/// Frozen cards are listed but cannot be opened.
pub fn describe(card: &Card) -> RowDescriptor {
    RowDescriptor {
        title: format!("{} •••• {}", card.brand, card.last_four),
        subtitle: format!("{} · expires {}", card.holder_name, card.expiry_label()),
        accessory: card.frozen.then(|| "frozen".to_string()),
        selectable: !card.frozen,
        action: RowAction::OpenCardDetail(card.card_id.clone()),
    }
}
