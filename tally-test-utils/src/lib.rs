//! Tally Test Utilities
//!
//! Centralized test infrastructure for the Tally workspace:
//! - Proptest generators for records and users
//! - A manually advanced clock for cache window tests
//! - Test fixtures for common scenarios
//! - Custom assertions for Tally-specific validation

// Re-export the scripted source from its source crate
pub use tally_storage::ScriptedSource;

// Re-export core types for convenience
pub use tally_core::{
    Card, CardBrand, CardId, FetchConfig, FetchError, FixedUser, Friend, FriendId, Record,
    RecordKind, SessionUser, TallyError, TallyResult, Timestamp, Transfer, TransferDirection,
    TransferId, User,
};

use chrono::{DateTime, Local, Utc};
use std::sync::Mutex;
use std::time::Duration;

// ============================================================================
// MANUAL CLOCK
// ============================================================================

/// A [`mockable::Clock`] that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// A clock stopped at the fixture epoch.
    pub fn at_epoch() -> Self {
        Self::new(fixtures::epoch())
    }

    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += chrono::Duration::from_std(by).unwrap();
    }
}

impl mockable::Clock for ManualClock {
    fn local(&self) -> DateTime<Local> {
        self.utc().with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

// ============================================================================
// PROPTEST GENERATORS
// ============================================================================

pub mod generators {
    //! Proptest strategies for generating Tally entity types.

    use super::*;
    use proptest::prelude::*;

    /// Generate a timestamp within a few years of the fixture epoch.
    pub fn arb_timestamp() -> impl Strategy<Value = Timestamp> {
        (0i64..100_000_000).prop_map(|offset| {
            DateTime::from_timestamp(fixtures::EPOCH_SECS + offset, 0).unwrap()
        })
    }

    pub fn arb_user() -> impl Strategy<Value = User> {
        ("u[0-9]{1,3}", "[A-Z][a-z]{2,8}", any::<bool>())
            .prop_map(|(id, name, premium)| User::new(id, name, premium))
    }

    pub fn arb_friend() -> impl Strategy<Value = Friend> {
        ("f[0-9]{1,4}", "[A-Z][a-z]{2,8}", any::<bool>(), arb_timestamp()).prop_map(
            |(id, name, is_premium, added_at)| Friend {
                friend_id: FriendId::new(id),
                handle: name.to_lowercase(),
                name,
                is_premium,
                added_at,
            },
        )
    }

    pub fn arb_card_brand() -> impl Strategy<Value = CardBrand> {
        prop_oneof![
            Just(CardBrand::Visa),
            Just(CardBrand::Mastercard),
            Just(CardBrand::Amex),
        ]
    }

    pub fn arb_card() -> impl Strategy<Value = Card> {
        (
            "c[0-9]{1,4}",
            arb_card_brand(),
            "[0-9]{4}",
            1u8..=12,
            2024u16..2040,
            any::<bool>(),
        )
            .prop_map(|(id, brand, last_four, expiry_month, expiry_year, frozen)| Card {
                card_id: CardId::new(id),
                holder_name: "Test Holder".to_string(),
                brand,
                last_four,
                expiry_month,
                expiry_year,
                frozen,
            })
    }

    pub fn arb_transfer_direction() -> impl Strategy<Value = TransferDirection> {
        prop_oneof![Just(TransferDirection::Sent), Just(TransferDirection::Received)]
    }

    pub fn arb_transfer() -> impl Strategy<Value = Transfer> {
        (
            "t[0-9]{1,4}",
            "[A-Z][a-z]{2,8}",
            1i64..1_000_000,
            arb_transfer_direction(),
            proptest::option::of("[a-z ]{1,20}"),
            arb_timestamp(),
        )
            .prop_map(
                |(id, counterparty, amount_minor, direction, memo, created_at)| Transfer {
                    transfer_id: TransferId::new(id),
                    counterparty,
                    amount_minor,
                    currency: "USD".to_string(),
                    direction,
                    memo,
                    created_at,
                },
            )
    }

    /// Generate a record of any kind.
    pub fn arb_record() -> impl Strategy<Value = Record> {
        prop_oneof![
            arb_friend().prop_map(Record::Friend),
            arb_card().prop_map(Record::Card),
            arb_transfer().prop_map(Record::Transfer),
        ]
    }

    pub fn arb_records(max: usize) -> impl Strategy<Value = Vec<Record>> {
        proptest::collection::vec(arb_record(), 0..=max)
    }
}

// ============================================================================
// TEST FIXTURES
// ============================================================================

pub mod fixtures {
    //! Pre-built test fixtures for common testing scenarios.

    use super::*;

    /// 2026-01-05T09:00:00Z.
    pub const EPOCH_SECS: i64 = 1_767_603_600;

    pub fn epoch() -> DateTime<Utc> {
        DateTime::from_timestamp(EPOCH_SECS, 0).unwrap()
    }

    /// Fetch configuration with no latency, no backoff and `max_retries` retries.
    pub fn fast_config(max_retries: u32) -> FetchConfig {
        let mut config = FetchConfig::standard();
        config.retry = tally_core::RetryConfig::immediate(max_retries);
        config.latency = tally_core::LatencyConfig::zero();
        config.page_size = None;
        config
    }

    pub fn premium_user() -> User {
        User::new("u1", "Ada", true)
    }

    pub fn free_user() -> User {
        User::new("u1", "Ada", false)
    }

    /// The friend `{id: "f1", name: "Ada"}`.
    pub fn ada() -> Friend {
        friend("f1", "Ada")
    }

    pub fn friend(id: &str, name: &str) -> Friend {
        Friend {
            friend_id: FriendId::new(id),
            name: name.to_string(),
            handle: name.to_lowercase(),
            is_premium: false,
            added_at: epoch(),
        }
    }

    /// `n` friends named "Friend 1" .. "Friend n".
    pub fn friends(n: usize) -> Vec<Record> {
        (1..=n)
            .map(|i| Record::Friend(friend(&format!("f{i}"), &format!("Friend {i}"))))
            .collect()
    }

    pub fn card(id: &str, last_four: &str) -> Card {
        Card {
            card_id: CardId::new(id),
            holder_name: "Ada Lovelace".to_string(),
            brand: CardBrand::Visa,
            last_four: last_four.to_string(),
            expiry_month: 4,
            expiry_year: 2028,
            frozen: false,
        }
    }

    pub fn transfer(id: &str, direction: TransferDirection, amount_minor: i64) -> Transfer {
        Transfer {
            transfer_id: TransferId::new(id),
            counterparty: "Grace".to_string(),
            amount_minor,
            currency: "USD".to_string(),
            direction,
            memo: None,
            created_at: epoch(),
        }
    }

    /// A failure the retry policy will see as retryable.
    pub fn failure(kind: RecordKind) -> FetchError {
        FetchError::Failed {
            kind,
            reason: "simulated outage".to_string(),
        }
    }
}

// ============================================================================
// CUSTOM ASSERTIONS
// ============================================================================

pub mod assertions {
    //! Custom assertion functions for Tally-specific validation.

    use super::*;

    /// Assert that a TallyResult is Ok.
    #[track_caller]
    pub fn assert_ok<T: std::fmt::Debug>(result: &TallyResult<T>) {
        assert!(result.is_ok(), "Expected Ok, got Err: {:?}", result);
    }

    /// Assert that a TallyResult is a FetchFailed error.
    #[track_caller]
    pub fn assert_fetch_failed<T: std::fmt::Debug>(result: &TallyResult<T>) {
        match result {
            Err(TallyError::FetchFailed(_)) => {}
            other => panic!("Expected FetchFailed error, got: {:?}", other),
        }
    }

    /// Assert that a TallyResult is a Config error.
    #[track_caller]
    pub fn assert_config_error<T: std::fmt::Debug>(result: &TallyResult<T>) {
        match result {
            Err(TallyError::Config(_)) => {}
            other => panic!("Expected Config error, got: {:?}", other),
        }
    }
}
