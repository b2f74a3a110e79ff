//! JSON file store for native builds
//!
//! The file holds one flat object mapping keys to scores. It is rewritten
//! through a temp file and a rename so a crash never leaves it half written.

use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{HighScoreStore, StorageError};

type Table = BTreeMap<String, u32>;

/// High score file on disk
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_table(&self) -> Result<Table, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(json) => Ok(serde_json::from_str(&json)?),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Table::new()),
            Err(e) => Err(e.into()),
        }
    }
}

impl HighScoreStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<u32>, StorageError> {
        Ok(self.read_table()?.get(key).copied())
    }

    fn store(&mut self, key: &str, value: u32) -> Result<(), StorageError> {
        let mut table = match self.read_table() {
            Ok(table) => table,
            Err(StorageError::Json(e)) => {
                log::warn!("Replacing corrupt score file {}: {}", self.path.display(), e);
                Table::new()
            }
            Err(e) => return Err(e),
        };
        table.insert(key.to_string(), value);

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, serde_json::to_string_pretty(&table)?)?;
        fs::rename(&tmp, &self.path)?;
        log::debug!("Wrote {} = {} to {}", key, value, self.path.display());
        Ok(())
    }
}
