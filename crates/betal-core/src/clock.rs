//! Wall-clock time for curses and the result pause.
//!
//! Nothing in the game advances time on its own: deadlines are stored as
//! instants and compared against `Clock::now` whenever state is read.

use chrono::{DateTime, Duration, Utc};

/// Source of the current instant. Injected so curse expiry and the delayed
/// return to sleep can be driven by tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;

    /// The instant `delay` from now.
    fn deadline_after(&self, delay: Duration) -> DateTime<Utc> {
        self.now() + delay
    }

    /// Whether `deadline` has been reached. A deadline equal to now is due.
    fn is_due(&self, deadline: DateTime<Utc>) -> bool {
        self.now() >= deadline
    }
}

/// Clock backed by the host's system time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
