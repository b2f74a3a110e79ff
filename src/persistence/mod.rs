//! Storage backends for the persisted high score
//!
//! Values are plain integers stored under a string key:
//! - [`MemoryStore`]: tests and throwaway sessions
//! - [`FileStore`]: a JSON object on disk (native only)
//! - [`LocalStorageStore`]: browser LocalStorage (wasm32 only)

use std::collections::HashMap;

use thiserror::Error;

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;

/// Storage failures. Callers log these and carry on.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("stored value {0:?} is not a score")]
    Corrupt(String),
    #[error("storage rejected the write: {0}")]
    Rejected(String),
}

/// Key/value persistence for integer scores
pub trait HighScoreStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StorageError>;
    fn store(&mut self, key: &str, value: u32) -> Result<(), StorageError>;
}

/// Parse a stored score string
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
pub(crate) fn parse_score(raw: &str) -> Result<u32, StorageError> {
    raw.trim()
        .parse()
        .map_err(|_| StorageError::Corrupt(raw.to_string()))
}

/// Non-persistent store
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StorageError> {
        Ok(self.values.get(key).copied())
    }

    fn store(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }
}
