//! Randomness for story selection.
//!
//! A theme usually has several stories; one is drawn uniformly each time the
//! theme is chosen. Tests inject a scripted picker instead.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Draws indices for story selection.
pub trait DeterministicRng: Send + Sync {
    /// A uniformly drawn `u32` in `[min, max]` inclusive. Returns `min` when
    /// the range is empty or a single value.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;
}

/// Production RNG backed by `StdRng`.
#[derive(Debug, Clone)]
pub struct StdDeterministicRng {
    inner: StdRng,
}

impl StdDeterministicRng {
    /// Seeds from the operating system.
    #[must_use]
    pub fn from_os() -> Self {
        Self {
            inner: StdRng::from_os_rng(),
        }
    }

    /// Seeds from a fixed value, for reproducible runs.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            inner: StdRng::seed_from_u64(seed),
        }
    }
}

impl DeterministicRng for StdDeterministicRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        self.inner.random_range(min..=max)
    }
}
