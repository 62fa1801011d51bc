//! Core record structures

use crate::{CardId, FriendId, Timestamp, TransferId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Friend - a contact money can be sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Friend {
    pub friend_id: FriendId,
    pub name: String,
    /// Public handle, shown without the leading `@`.
    pub handle: String,
    /// Whether this friend also holds a premium account.
    pub is_premium: bool,
    pub added_at: Timestamp,
}

/// Card network of a payment card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardBrand {
    Visa,
    Mastercard,
    Amex,
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            CardBrand::Visa => "Visa",
            CardBrand::Mastercard => "Mastercard",
            CardBrand::Amex => "Amex",
        };
        f.write_str(label)
    }
}

/// Card - a payment card linked to the account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub card_id: CardId,
    pub holder_name: String,
    pub brand: CardBrand,
    pub last_four: String,
    pub expiry_month: u8,
    pub expiry_year: u16,
    /// Frozen cards are listed but cannot be opened.
    pub frozen: bool,
}

impl Card {
    /// Expiry rendered as `MM/YY`.
    pub fn expiry_label(&self) -> String {
        format!("{:02}/{:02}", self.expiry_month, self.expiry_year % 100)
    }
}

/// Direction of a transfer relative to the current user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransferDirection {
    Sent,
    Received,
}

/// Transfer - money moved between the user and a counterparty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfer {
    pub transfer_id: TransferId,
    pub counterparty: String,
    /// Amount in minor units (cents).
    pub amount_minor: i64,
    pub currency: String,
    pub direction: TransferDirection,
    pub memo: Option<String>,
    pub created_at: Timestamp,
}

impl Transfer {
    /// Amount rendered with two decimals and the currency code, e.g. `12.50 USD`.
    pub fn amount_label(&self) -> String {
        let sign = if self.amount_minor < 0 { "-" } else { "" };
        let abs = self.amount_minor.unsigned_abs();
        format!("{}{}.{:02} {}", sign, abs / 100, abs % 100, self.currency)
    }
}

/// Record kind discriminator, one per data source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecordKind {
    Friend,
    Card,
    Transfer,
}

impl fmt::Display for RecordKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            RecordKind::Friend => "friends",
            RecordKind::Card => "cards",
            RecordKind::Transfer => "transfers",
        };
        f.write_str(label)
    }
}

/// One item of domain data returned by a data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Record {
    Friend(Friend),
    Card(Card),
    Transfer(Transfer),
}

impl Record {
    pub fn kind(&self) -> RecordKind {
        match self {
            Record::Friend(_) => RecordKind::Friend,
            Record::Card(_) => RecordKind::Card,
            Record::Transfer(_) => RecordKind::Transfer,
        }
    }

    /// Stable identifier of the underlying record.
    pub fn record_id(&self) -> &str {
        use crate::RecordIdType;
        match self {
            Record::Friend(friend) => friend.friend_id.as_str(),
            Record::Card(card) => card.card_id.as_str(),
            Record::Transfer(transfer) => transfer.transfer_id.as_str(),
        }
    }
}

impl From<Friend> for Record {
    fn from(friend: Friend) -> Self {
        Record::Friend(friend)
    }
}

impl From<Card> for Record {
    fn from(card: Card) -> Self {
        Record::Card(card)
    }
}

impl From<Transfer> for Record {
    fn from(transfer: Transfer) -> Self {
        Record::Transfer(transfer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn transfer(amount_minor: i64) -> Transfer {
        Transfer {
            transfer_id: TransferId::new("t1"),
            counterparty: "Grace".to_string(),
            amount_minor,
            currency: "USD".to_string(),
            direction: TransferDirection::Sent,
            memo: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_amount_label_formats_minor_units() {
        assert_eq!(transfer(1250).amount_label(), "12.50 USD");
        assert_eq!(transfer(7).amount_label(), "0.07 USD");
        assert_eq!(transfer(-300).amount_label(), "-3.00 USD");
    }

    #[test]
    fn test_expiry_label_is_two_digit() {
        let card = Card {
            card_id: CardId::new("c1"),
            holder_name: "Ada Lovelace".to_string(),
            brand: CardBrand::Visa,
            last_four: "4242".to_string(),
            expiry_month: 3,
            expiry_year: 2029,
            frozen: false,
        };
        assert_eq!(card.expiry_label(), "03/29");
    }

    #[test]
    fn test_record_serializes_with_kind_tag() {
        let record = Record::from(transfer(100));
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["kind"], "transfer");
        assert_eq!(value["transfer_id"], "t1");
        assert_eq!(record.kind(), RecordKind::Transfer);
        assert_eq!(record.record_id(), "t1");
    }
}
