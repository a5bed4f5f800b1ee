//! Shared test mocks and utilities for the Tales of Betal game engine.

mod catalog;
mod clock;
mod rng;
mod storage;

pub use catalog::{FailingCatalog, story_fixture};
pub use clock::{FixedClock, ManualClock, fixed_instant};
pub use rng::{FirstPickRng, SequenceRng};
pub use storage::{FailingStorage, RecordingStorage};
