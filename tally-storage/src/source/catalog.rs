//! Built-in demo catalog served by the simulated sources.

use chrono::{DateTime, Utc};
use tally_core::{
    Card, CardBrand, CardId, Friend, FriendId, Record, Transfer, TransferDirection, TransferId,
};

/// 2026-01-05T09:00:00Z, the anchor every catalog timestamp is offset from.
const CATALOG_EPOCH_SECS: i64 = 1_767_603_600;

const FRIEND_NAMES: &[(&str, bool)] = &[
    ("Ada Lovelace", true),
    ("Alan Turing", false),
    ("Barbara Liskov", true),
    ("Charles Babbage", false),
    ("Dennis Ritchie", false),
    ("Donald Knuth", true),
    ("Edsger Dijkstra", false),
    ("Frances Allen", false),
    ("Grace Hopper", true),
    ("Hedy Lamarr", false),
    ("Ivan Sutherland", false),
    ("John McCarthy", false),
    ("Ken Thompson", true),
    ("Leslie Lamport", false),
    ("Margaret Hamilton", true),
    ("Niklaus Wirth", false),
    ("Radia Perlman", false),
    ("Robin Milner", false),
    ("Shafi Goldwasser", true),
    ("Sophie Wilson", false),
    ("Tony Hoare", false),
    ("Vint Cerf", false),
    ("Whitfield Diffie", false),
    ("Yukihiro Matsumoto", false),
];

fn at(offset_hours: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(CATALOG_EPOCH_SECS + offset_hours * 3600, 0).unwrap_or_default()
}

/// The friends list, ordered by name.
pub fn friends() -> Vec<Record> {
    FRIEND_NAMES
        .iter()
        .enumerate()
        .map(|(i, (name, is_premium))| {
            let handle = name
                .split_whitespace()
                .map(str::to_lowercase)
                .collect::<Vec<_>>()
                .join(".");
            Record::Friend(Friend {
                friend_id: FriendId::new(format!("f{}", i + 1)),
                name: name.to_string(),
                handle,
                is_premium: *is_premium,
                added_at: at(i as i64 * 24),
            })
        })
        .collect()
}

/// Cards linked to the account.
pub fn cards() -> Vec<Record> {
    let specs: [(CardBrand, &str, u8, u16, bool); 4] = [
        (CardBrand::Visa, "4242", 4, 2028, false),
        (CardBrand::Mastercard, "5454", 11, 2027, false),
        (CardBrand::Amex, "0005", 2, 2030, true),
        (CardBrand::Visa, "1881", 8, 2029, false),
    ];
    specs
        .iter()
        .enumerate()
        .map(|(i, (brand, last_four, month, year, frozen))| {
            Record::Card(Card {
                card_id: CardId::new(format!("c{}", i + 1)),
                holder_name: "Tally Demo".to_string(),
                brand: *brand,
                last_four: last_four.to_string(),
                expiry_month: *month,
                expiry_year: *year,
                frozen: *frozen,
            })
        })
        .collect()
}

/// Transfers in both directions, newest first.
pub fn transfers() -> Vec<Record> {
    let specs: [(&str, i64, TransferDirection, Option<&str>); 14] = [
        ("Ada Lovelace", 2_500, TransferDirection::Sent, Some("Coffee")),
        ("Grace Hopper", 12_000, TransferDirection::Received, Some("Concert tickets")),
        ("Alan Turing", 4_750, TransferDirection::Sent, None),
        ("Donald Knuth", 256, TransferDirection::Received, Some("Reward check")),
        ("Barbara Liskov", 8_000, TransferDirection::Sent, Some("Rent split")),
        ("Ken Thompson", 1_999, TransferDirection::Received, None),
        ("Margaret Hamilton", 3_300, TransferDirection::Sent, Some("Lunch")),
        ("Radia Perlman", 6_400, TransferDirection::Received, Some("Road trip gas")),
        ("Tony Hoare", 1_000, TransferDirection::Sent, None),
        ("Sophie Wilson", 15_000, TransferDirection::Received, Some("Deposit back")),
        ("Vint Cerf", 900, TransferDirection::Sent, Some("Snacks")),
        ("Leslie Lamport", 2_200, TransferDirection::Received, None),
        ("Hedy Lamarr", 5_000, TransferDirection::Sent, Some("Birthday gift")),
        ("Edsger Dijkstra", 700, TransferDirection::Received, Some("Parking")),
    ];
    let newest = specs.len() as i64 * 6;
    specs
        .iter()
        .enumerate()
        .map(|(i, (counterparty, amount_minor, direction, memo))| {
            Record::Transfer(Transfer {
                transfer_id: TransferId::new(format!("t{}", i + 1)),
                counterparty: counterparty.to_string(),
                amount_minor: *amount_minor,
                currency: "USD".to_string(),
                direction: *direction,
                memo: memo.map(str::to_string),
                created_at: at(newest - i as i64 * 6),
            })
        })
        .collect()
}
