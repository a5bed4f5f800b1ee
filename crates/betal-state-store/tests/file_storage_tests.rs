//! Integration tests for `FileStorage`.

use std::path::PathBuf;

use betal_core::error::DomainError;
use betal_core::storage::KeyValueStorage;
use betal_state_store::file_storage::FileStorage;
use uuid::Uuid;

/// A fresh directory under the system temp dir, removed on drop.
struct ScratchDir(PathBuf);

impl ScratchDir {
    fn new() -> Self {
        Self(std::env::temp_dir().join(format!("betal-storage-{}", Uuid::new_v4())))
    }
}

impl Drop for ScratchDir {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.0);
    }
}

// --- open ---

#[test]
fn test_open_creates_missing_directory() {
    let scratch = ScratchDir::new();
    let nested = scratch.0.join("state");

    let storage = FileStorage::open(&nested).unwrap();

    assert!(storage.dir().is_dir());
}

// --- get / set round-trip ---

#[test]
fn test_get_returns_none_when_file_missing() {
    let scratch = ScratchDir::new();
    let storage = FileStorage::open(&scratch.0).unwrap();

    assert_eq!(storage.get("betal-game-state").unwrap(), None);
}

#[test]
fn test_set_then_get_returns_same_value() {
    let scratch = ScratchDir::new();
    let storage = FileStorage::open(&scratch.0).unwrap();
    let payload = r#"{"coins":4,"curseUntil":null,"dontKnowCount":1}"#;

    storage.set("betal-game-state", payload).unwrap();

    assert_eq!(
        storage.get("betal-game-state").unwrap().as_deref(),
        Some(payload)
    );
    assert!(scratch.0.join("betal-game-state.json").is_file());
    assert!(!scratch.0.join("betal-game-state.json.tmp").exists());
}

#[test]
fn test_value_survives_reopening_directory() {
    let scratch = ScratchDir::new();
    FileStorage::open(&scratch.0)
        .unwrap()
        .set("betal-game-state", "{}")
        .unwrap();

    let reopened = FileStorage::open(&scratch.0).unwrap();

    assert_eq!(
        reopened.get("betal-game-state").unwrap().as_deref(),
        Some("{}")
    );
}

// --- remove ---

#[test]
fn test_remove_deletes_file_and_tolerates_missing() {
    let scratch = ScratchDir::new();
    let storage = FileStorage::open(&scratch.0).unwrap();
    storage.set("betal-game-state", "{}").unwrap();

    storage.remove("betal-game-state").unwrap();
    storage.remove("betal-game-state").unwrap();

    assert_eq!(storage.get("betal-game-state").unwrap(), None);
}

// --- key validation ---

#[test]
fn test_path_traversal_key_is_rejected() {
    let scratch = ScratchDir::new();
    let storage = FileStorage::open(&scratch.0).unwrap();

    let result = storage.set("../escape", "{}");

    match result.unwrap_err() {
        DomainError::Validation(msg) => assert!(msg.contains("invalid storage key")),
        other => panic!("expected Validation, got {other:?}"),
    }
}

#[test]
fn test_empty_key_is_rejected() {
    let scratch = ScratchDir::new();
    let storage = FileStorage::open(&scratch.0).unwrap();

    assert!(storage.get("").is_err());
}
