//! Browser LocalStorage store
//!
//! Scores are stored as decimal strings so pages that read the key directly
//! keep working.

use web_sys::Storage;

use super::{HighScoreStore, StorageError, parse_score};

/// LocalStorage-backed store
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<Storage, StorageError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or(StorageError::Unavailable)
    }
}

impl HighScoreStore for LocalStorageStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StorageError> {
        let raw = Self::storage()?
            .get_item(key)
            .map_err(|_| StorageError::Unavailable)?;
        raw.map(|raw| parse_score(&raw)).transpose()
    }

    fn store(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        Self::storage()?
            .set_item(key, &value.to_string())
            .map_err(|e| StorageError::Rejected(format!("{:?}", e)))
    }
}
