//! Domain types for the game engine.

pub mod intents;
pub mod notices;
pub mod rules;
pub mod session;
pub mod state;
