//! Test clocks: deterministic `Clock` implementations for tests.

use std::sync::Mutex;

use betal_core::clock::Clock;
use chrono::{DateTime, Duration, TimeZone, Utc};

/// The instant every test starts from: 2026-01-15 10:00:00 UTC.
///
/// # Panics
///
/// Never; the literal date is valid.
#[must_use]
pub fn fixed_instant() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap()
}

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A clock that only moves when told to. Used to simulate curse expiry and
/// the delayed return to sleep without sleeping.
#[derive(Debug)]
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Creates a clock stopped at `start`.
    #[must_use]
    pub fn new(start: DateTime<Utc>) -> Self {
        Self {
            now: Mutex::new(start),
        }
    }

    /// Moves the clock forward by `millis` milliseconds.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn advance_millis(&self, millis: i64) {
        let mut now = self.now.lock().unwrap();
        *now += Duration::milliseconds(millis);
    }

    /// Sets the clock to `instant`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn set(&self, instant: DateTime<Utc>) {
        *self.now.lock().unwrap() = instant;
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(fixed_instant())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}
