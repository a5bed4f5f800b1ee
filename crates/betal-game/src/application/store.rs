//! Game state store: the single source of truth for coins, curse window and
//! mercy usage.
//!
//! Every mutation writes through to the injected storage. Storage failures
//! are logged and swallowed; the in-memory state stays authoritative for the
//! rest of the session.

use std::sync::Arc;

use betal_core::clock::Clock;
use betal_core::storage::KeyValueStorage;
use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use crate::domain::rules::MAX_DONT_KNOW;
use crate::domain::state::{GameState, GameStateRecord};

/// Storage key of the persisted record.
pub const STATE_KEY: &str = "betal-game-state";

/// Result of spending a mercy pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DontKnowUse {
    /// Accepted; `remaining` passes are left.
    Granted {
        /// Passes left after this one.
        remaining: u32,
    },
    /// Accepted, and the option is now locked.
    Exhausted,
    /// Already locked; nothing changed.
    Rejected,
}

/// Owns `GameState` and persists it on every change.
pub struct GameStateStore {
    state: GameState,
    storage: Arc<dyn KeyValueStorage>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for GameStateStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameStateStore")
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl GameStateStore {
    /// Opens the store, loading whatever the storage holds.
    #[must_use]
    pub fn open(storage: Arc<dyn KeyValueStorage>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self {
            state: GameState::default(),
            storage,
            clock,
        };
        store.state = store.load();
        store
    }

    /// Reads the persisted state. Absent, unreadable or malformed data
    /// yields the defaults; a curse that has already ended is dropped.
    #[must_use]
    pub fn load(&self) -> GameState {
        let raw = match self.storage.get(STATE_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => return GameState::default(),
            Err(e) => {
                warn!(error = %e, "game state unavailable, using defaults");
                return GameState::default();
            }
        };
        match serde_json::from_str::<GameStateRecord>(&raw) {
            Ok(record) => GameState::from_record(&record, self.clock.now()),
            Err(e) => {
                warn!(error = %e, "discarding malformed game state");
                GameState::default()
            }
        }
    }

    /// Writes the current state through to storage.
    pub fn save(&self) {
        let payload = match serde_json::to_string(&self.state.to_record()) {
            Ok(payload) => payload,
            Err(e) => {
                warn!(error = %e, "game state serialization failed");
                return;
            }
        };
        match self.storage.set(STATE_KEY, &payload) {
            Ok(()) => debug!(coins = self.state.coins, "game state saved"),
            Err(e) => warn!(error = %e, "game state not persisted"),
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Current time according to the injected clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// The instant `delay` from now.
    #[must_use]
    pub fn deadline_after(&self, delay: Duration) -> DateTime<Utc> {
        self.clock.deadline_after(delay)
    }

    /// Whether `deadline` has been reached.
    #[must_use]
    pub fn is_due(&self, deadline: DateTime<Utc>) -> bool {
        self.clock.is_due(deadline)
    }

    /// Awards one coin and returns the new total.
    pub fn add_coin(&mut self) -> u64 {
        self.state.coins = self.state.coins.saturating_add(1);
        self.save();
        self.state.coins
    }

    /// Starts a curse lasting `duration` from now, replacing any active one.
    /// Returns when it ends.
    pub fn apply_curse(&mut self, duration: Duration) -> DateTime<Utc> {
        let until = self.clock.deadline_after(duration);
        self.state.curse_until = Some(until);
        self.save();
        until
    }

    /// Spends a mercy pass unless the option is already locked.
    pub fn use_dont_know(&mut self) -> DontKnowUse {
        if self.state.dont_know_locked() {
            return DontKnowUse::Rejected;
        }
        self.state.dont_know_count += 1;
        self.save();
        if self.state.dont_know_locked() {
            DontKnowUse::Exhausted
        } else {
            DontKnowUse::Granted {
                remaining: MAX_DONT_KNOW - self.state.dont_know_count,
            }
        }
    }

    /// Whether a curse is active right now.
    #[must_use]
    pub fn is_cursed(&self) -> bool {
        self.state.is_cursed_at(self.clock.now())
    }

    /// Time left on the curse; zero when not cursed.
    #[must_use]
    pub fn curse_time_remaining(&self) -> Duration {
        self.state.curse_remaining_at(self.clock.now())
    }

    /// Drops a curse window that has already ended. Returns whether one was
    /// cleared.
    pub fn clear_expired_curse(&mut self) -> bool {
        if !self.state.has_expired_curse_at(self.clock.now()) {
            return false;
        }
        self.state.curse_until = None;
        self.save();
        debug!("expired curse cleared");
        true
    }

    /// Restores the defaults and persists them.
    pub fn reset(&mut self) {
        self.state = GameState::default();
        self.save();
    }
}
