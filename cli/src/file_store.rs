//! Guest cart storage backed by JSON files.
//!
//! Each storage key maps to `<root>/<key>.json`. Writes go through a
//! temporary file and a rename so a crash never leaves a half-written cart.

#[cfg(test)]
#[path = "file_store_test.rs"]
mod tests;

use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use cart::{CartStorage, StorageError};

#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        if key.is_empty() || key == "." || key == ".." || key.contains(['/', '\\']) {
            return Err(StorageError::Unavailable(format!("invalid storage key {key:?}")));
        }
        Ok(self.root.join(format!("{key}.json")))
    }
}

impl CartStorage for FileStorage {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StorageError::Read(format!("{}: {e}", path.display()))),
        }
    }

    fn save(&self, key: &str, raw: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let write = |e: std::io::Error| StorageError::Write(format!("{}: {e}", path.display()));

        fs::create_dir_all(&self.root).map_err(write)?;
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, raw).map_err(write)?;
        fs::rename(&tmp, &path).map_err(write)
    }
}
