//! Key/value storage abstraction for persisted game state.

use crate::error::DomainError;

/// A string key/value store that survives reloads (browser storage, a local
/// directory, or plain memory).
pub trait KeyValueStorage: Send + Sync {
    /// Reads the value stored under `key`, or `None` if absent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backend is unavailable.
    fn get(&self, key: &str) -> Result<Option<String>, DomainError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the write fails.
    fn set(&self, key: &str, value: &str) -> Result<(), DomainError>;

    /// Removes `key`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the backend is unavailable.
    fn remove(&self, key: &str) -> Result<(), DomainError>;
}
