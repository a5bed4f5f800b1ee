//! `window.localStorage` backend for builds that run in the browser.

use betal_core::error::DomainError;
use betal_core::storage::KeyValueStorage;

/// Browser `localStorage`, scoped to the page's origin.
#[derive(Debug, Clone, Copy, Default)]
pub struct BrowserStorage;

fn local_storage() -> Result<web_sys::Storage, DomainError> {
    let window = web_sys::window()
        .ok_or_else(|| DomainError::Infrastructure("no browser window".to_owned()))?;
    window
        .local_storage()
        .map_err(|_| DomainError::Infrastructure("localStorage access denied".to_owned()))?
        .ok_or_else(|| DomainError::Infrastructure("localStorage unavailable".to_owned()))
}

impl KeyValueStorage for BrowserStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        local_storage()?
            .get_item(key)
            .map_err(|_| DomainError::Infrastructure(format!("localStorage read failed: {key}")))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        local_storage()?
            .set_item(key, value)
            .map_err(|_| DomainError::Infrastructure(format!("localStorage quota exceeded: {key}")))
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        local_storage()?
            .remove_item(key)
            .map_err(|_| DomainError::Infrastructure(format!("localStorage remove failed: {key}")))
    }
}
