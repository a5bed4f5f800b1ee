//! The persisted game state and its storage record.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::rules::MAX_DONT_KNOW;

/// Coins, curse window and mercy usage. The only state that outlives a page.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameState {
    /// Wisdom coins earned; only ever grows between resets.
    pub coins: u64,
    /// Instant the active curse ends. `None` or a past instant means no curse.
    pub curse_until: Option<DateTime<Utc>>,
    /// "I don't know" passes used, never above `MAX_DONT_KNOW`.
    pub dont_know_count: u32,
}

impl GameState {
    /// Whether the mercy option is used up.
    #[must_use]
    pub fn dont_know_locked(&self) -> bool {
        self.dont_know_count >= MAX_DONT_KNOW
    }

    /// Whether a curse is active at `now`.
    #[must_use]
    pub fn is_cursed_at(&self, now: DateTime<Utc>) -> bool {
        self.curse_until.is_some_and(|until| now < until)
    }

    /// Time left on the curse at `now`; zero when not cursed.
    #[must_use]
    pub fn curse_remaining_at(&self, now: DateTime<Utc>) -> Duration {
        self.curse_until
            .map_or_else(Duration::zero, |until| (until - now).max(Duration::zero()))
    }

    /// Whether `curse_until` is set but already over at `now`.
    #[must_use]
    pub fn has_expired_curse_at(&self, now: DateTime<Utc>) -> bool {
        self.curse_until.is_some_and(|until| now >= until)
    }

    /// Builds the state from a storage record, dropping a curse that has
    /// already ended and clamping the mercy counter.
    #[must_use]
    pub fn from_record(record: &GameStateRecord, now: DateTime<Utc>) -> Self {
        let curse_until = record
            .curse_until
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .filter(|until| now < *until);
        Self {
            coins: record.coins,
            curse_until,
            dont_know_count: record.dont_know_count.min(MAX_DONT_KNOW),
        }
    }

    /// The storage record for this state.
    #[must_use]
    pub fn to_record(&self) -> GameStateRecord {
        GameStateRecord {
            coins: self.coins,
            curse_until: self.curse_until.map(|until| until.timestamp_millis()),
            dont_know_count: self.dont_know_count,
        }
    }
}

/// Serialized layout of `GameState`:
/// `{ "coins": 3, "curseUntil": 1768471230000, "dontKnowCount": 1 }`.
///
/// Missing fields default, unknown fields are ignored, and the older
/// `cursedUntil` spelling is accepted on read.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GameStateRecord {
    /// Coins earned.
    pub coins: u64,
    /// Curse end as epoch milliseconds.
    #[serde(alias = "cursedUntil")]
    pub curse_until: Option<i64>,
    /// Mercy passes used.
    pub dont_know_count: u32,
}
