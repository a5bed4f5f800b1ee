//! Test storages: mock `KeyValueStorage` implementations for tests.

use std::collections::HashMap;
use std::sync::Mutex;

use betal_core::error::DomainError;
use betal_core::storage::KeyValueStorage;

/// A storage that keeps values in memory and records every write. Can be
/// seeded with a raw payload to simulate state left by an earlier session.
#[derive(Debug, Default)]
pub struct RecordingStorage {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<(String, String)>>,
}

impl RecordingStorage {
    /// Create an empty recording storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a storage that already holds `value` under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn seeded(key: &str, value: &str) -> Self {
        let storage = Self::new();
        storage
            .entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        storage
    }

    /// Returns a snapshot of all `set` calls, in order.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn writes(&self) -> Vec<(String, String)> {
        self.writes.lock().unwrap().clone()
    }

    /// Returns the current raw value under `key`.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    pub fn raw(&self, key: &str) -> Option<String> {
        self.entries.lock().unwrap().get(key).cloned()
    }
}

impl KeyValueStorage for RecordingStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), value.to_owned());
        self.writes
            .lock()
            .unwrap()
            .push((key.to_owned(), value.to_owned()));
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// A storage that always returns an infrastructure error. Useful for testing
/// that persistence failures never reach the player.
#[derive(Debug)]
pub struct FailingStorage;

impl KeyValueStorage for FailingStorage {
    fn get(&self, _key: &str) -> Result<Option<String>, DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }

    fn set(&self, _key: &str, _value: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("quota exceeded".into()))
    }

    fn remove(&self, _key: &str) -> Result<(), DomainError> {
        Err(DomainError::Infrastructure("storage unavailable".into()))
    }
}
