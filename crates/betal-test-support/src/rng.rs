//! Scripted story pickers.

use betal_core::rng::DeterministicRng;

/// Always picks the first story of a theme's pool.
#[derive(Debug, Clone, Copy, Default)]
pub struct FirstPickRng;

impl DeterministicRng for FirstPickRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }
}

/// Replays a fixed list of picks, starting over once the list runs out.
///
/// Values are returned as given, even outside the requested range, so
/// callers' clamping can be exercised. Every requested range is recorded.
#[derive(Debug, Clone, Default)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
    ranges: Vec<(u32, u32)>,
}

impl SequenceRng {
    /// Creates a picker that replays `values`. An empty list always picks
    /// the low end of the range.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self {
            values,
            ..Self::default()
        }
    }

    /// Every `(min, max)` requested so far, oldest first.
    #[must_use]
    pub fn ranges(&self) -> &[(u32, u32)] {
        &self.ranges
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.ranges.push((min, max));
        if self.values.is_empty() {
            return min;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value
    }
}
