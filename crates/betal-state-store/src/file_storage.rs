//! Directory-backed `KeyValueStorage` implementation.
//!
//! Each key maps to `<dir>/<key>.json`. Writes land in a sibling temp file
//! first and are renamed into place so a crash never leaves half a record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use betal_core::error::DomainError;
use betal_core::storage::KeyValueStorage;
use tracing::debug;

/// Stores each key as a JSON file inside a directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Opens (creating if needed) a storage directory.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Infrastructure` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            DomainError::Infrastructure(format!(
                "cannot create storage directory {}: {e}",
                dir.display()
            ))
        })?;
        Ok(Self { dir })
    }

    /// Returns the storage directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, DomainError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
            && !key.starts_with('.');
        if !valid {
            return Err(DomainError::Validation(format!(
                "invalid storage key: {key:?}"
            )));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, DomainError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        debug!(path = %path.display(), bytes = value.len(), "storage record written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), DomainError> {
        let path = self.path_for(key)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
