//! Betal Core: shared abstractions.
//!
//! This crate defines the traits and types that the game engine, the story
//! catalog and the storage backends depend on. It contains no infrastructure
//! code.

pub mod clock;
pub mod error;
pub mod rng;
pub mod storage;
