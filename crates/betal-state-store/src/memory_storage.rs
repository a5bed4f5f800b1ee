//! In-memory `KeyValueStorage` implementation.

use std::collections::HashMap;
use std::sync::Mutex;

use betal_core::error::DomainError;
use betal_core::storage::KeyValueStorage;

/// Process-local storage. State lasts as long as the value does.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Creates an empty storage.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, String>>, DomainError> {
        self.entries
            .lock()
            .map_err(|_| DomainError::Infrastructure("memory storage lock poisoned".to_owned()))
    }
}

impl KeyValueStorage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        Ok(self.lock()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        self.lock()?.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        self.lock()?.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_returns_none_for_missing_key() {
        let storage = MemoryStorage::new();

        assert_eq!(storage.get("betal-game-state").unwrap(), None);
    }

    #[test]
    fn test_set_then_get_returns_value() {
        let storage = MemoryStorage::new();

        storage.set("betal-game-state", r#"{"coins":2}"#).unwrap();

        assert_eq!(
            storage.get("betal-game-state").unwrap().as_deref(),
            Some(r#"{"coins":2}"#)
        );
    }

    #[test]
    fn test_set_overwrites_previous_value() {
        let storage = MemoryStorage::new();
        storage.set("k", "first").unwrap();

        storage.set("k", "second").unwrap();

        assert_eq!(storage.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn test_remove_clears_key_and_tolerates_missing() {
        let storage = MemoryStorage::new();
        storage.set("k", "v").unwrap();

        storage.remove("k").unwrap();
        storage.remove("k").unwrap();

        assert_eq!(storage.get("k").unwrap(), None);
    }
}
