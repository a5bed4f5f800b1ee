//! Storage backends for the persisted game state record.
//!
//! Every backend implements `betal_core::storage::KeyValueStorage`; the game
//! engine picks one at startup and never touches the medium directly.

#[cfg(target_arch = "wasm32")]
pub mod browser_storage;
pub mod file_storage;
pub mod memory_storage;
