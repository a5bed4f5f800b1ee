//! Tunable game rules.

use betal_core::error::DomainError;
use chrono::Duration;

/// Number of "I don't know" passes a player gets before the option locks.
pub const MAX_DONT_KNOW: u32 = 3;

/// Default length of the curse applied after a wrong answer.
pub const DEFAULT_CURSE_DURATION_MS: i64 = 30_000;

/// Default pause on the result/moral screen before Betal falls asleep.
pub const DEFAULT_RETURN_DELAY_MS: i64 = 4_000;

/// Upper bound accepted for either duration (one day).
const MAX_DURATION_MS: i64 = 86_400_000;

/// Durations that govern a play-through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameRules {
    /// How long a wrong answer keeps Betal from waking.
    pub curse_duration: Duration,
    /// How long the result stays on screen before returning to sleep.
    pub return_delay: Duration,
}

impl GameRules {
    /// Builds rules from millisecond values.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if either value is negative or
    /// longer than a day.
    pub fn from_millis(curse_duration_ms: i64, return_delay_ms: i64) -> Result<Self, DomainError> {
        for (name, value) in [
            ("curse duration", curse_duration_ms),
            ("return delay", return_delay_ms),
        ] {
            if !(0..=MAX_DURATION_MS).contains(&value) {
                return Err(DomainError::Validation(format!(
                    "{name} must be between 0 and {MAX_DURATION_MS} ms, got {value}"
                )));
            }
        }
        Ok(Self {
            curse_duration: Duration::milliseconds(curse_duration_ms),
            return_delay: Duration::milliseconds(return_delay_ms),
        })
    }
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            curse_duration: Duration::milliseconds(DEFAULT_CURSE_DURATION_MS),
            return_delay: Duration::milliseconds(DEFAULT_RETURN_DELAY_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules_match_documented_values() {
        let rules = GameRules::default();

        assert_eq!(rules.curse_duration.num_milliseconds(), 30_000);
        assert_eq!(rules.return_delay.num_milliseconds(), 4_000);
    }

    #[test]
    fn test_from_millis_accepts_zero_delay() {
        let rules = GameRules::from_millis(1_000, 0).unwrap();

        assert_eq!(rules.return_delay, Duration::zero());
    }

    #[test]
    fn test_from_millis_rejects_negative_values() {
        match GameRules::from_millis(-1, 0).unwrap_err() {
            DomainError::Validation(msg) => assert!(msg.contains("curse duration")),
            other => panic!("expected Validation, got {other:?}"),
        }
    }

    #[test]
    fn test_from_millis_rejects_values_over_a_day() {
        assert!(GameRules::from_millis(30_000, MAX_DURATION_MS + 1).is_err());
    }
}
