//! Read-only views derived from the game state, the session and the clock.

use betal_content::domain::story::Story;
use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

use crate::domain::rules::{GameRules, MAX_DONT_KNOW};
use crate::domain::session::{AnswerOutcome, Mood, Phase, SessionView};
use crate::domain::state::GameState;

/// Mercy passes still available for `count` used.
#[must_use]
pub fn dont_know_remaining(count: u32) -> u32 {
    MAX_DONT_KNOW.saturating_sub(count)
}

/// Whole seconds left on a curse, rounded up. Zero or negative is zero.
#[must_use]
pub fn curse_seconds_remaining(remaining: Duration) -> u64 {
    u64::try_from(remaining.num_milliseconds())
        .map_or(0, |ms| ms.div_ceil(1000))
}

/// Everything the presentation layer renders.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameSnapshot {
    /// Where the session is in the sleep → story → question cycle.
    pub phase: Phase,
    /// Betal's expression.
    pub mood: Mood,
    /// Wisdom coins earned so far.
    pub coins: u64,
    /// Whether a curse blocks waking right now.
    pub is_cursed: bool,
    /// Countdown shown while cursed, in whole seconds rounded up; 0 when not cursed.
    pub curse_seconds_remaining: u64,
    /// Mercy passes used, at most `max_dont_know`.
    pub dont_know_count: u32,
    /// Mercy passes left.
    pub dont_know_remaining: u32,
    /// All mercy passes are used; "I don't know" is refused.
    pub dont_know_locked: bool,
    /// Mercy passes per game.
    pub max_dont_know: u32,
    /// The story being told or asked about.
    pub active_story: Option<Story>,
    /// Theme of the current or pending story, normalized.
    pub active_theme: Option<String>,
    /// Set once the question is answered, until Betal sleeps again.
    pub last_outcome: Option<AnswerOutcome>,
    /// Milliseconds until the result screen gives way to sleep.
    pub return_in_ms: Option<i64>,
    /// A catalog request is in flight.
    pub theme_loading: bool,
}

impl GameSnapshot {
    /// Snapshot at `now`. `return_in_ms` is bounded by the configured
    /// return delay.
    #[must_use]
    pub fn at(
        state: &GameState,
        session: &SessionView,
        rules: &GameRules,
        now: DateTime<Utc>,
    ) -> Self {
        let remaining = state.curse_remaining_at(now);
        let return_in_ms = session.pending_return().map(|due| {
            (due - now)
                .clamp(Duration::zero(), rules.return_delay.max(Duration::zero()))
                .num_milliseconds()
        });
        Self {
            phase: session.phase(),
            mood: session.mood(),
            coins: state.coins,
            is_cursed: state.is_cursed_at(now),
            curse_seconds_remaining: curse_seconds_remaining(remaining),
            dont_know_count: state.dont_know_count,
            dont_know_remaining: dont_know_remaining(state.dont_know_count),
            dont_know_locked: state.dont_know_locked(),
            max_dont_know: MAX_DONT_KNOW,
            active_story: session.active_story().cloned(),
            active_theme: session.active_theme().map(str::to_owned),
            last_outcome: session.last_outcome(),
            return_in_ms,
            theme_loading: session.pending_theme().is_some(),
        }
    }
}
