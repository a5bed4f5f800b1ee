//! Tales of Betal: game engine.
//!
//! Responsible for the persisted coin/curse/mercy counters, the
//! sleeping → awake → story → question state machine, and the read-only
//! views the presentation layer renders.

pub mod application;
pub mod domain;
