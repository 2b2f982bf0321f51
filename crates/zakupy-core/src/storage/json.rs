//! File-backed storage: one pretty-printed JSON document per collection,
//! `<data_dir>/<key>.json`.

use super::{Key, Storage};
use crate::error::StoreError;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct JsonStorage {
    dir: PathBuf,
}

impl JsonStorage {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, key: Key) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl Storage for JsonStorage {
    fn read(&self, key: Key) -> Result<Option<Value>, StoreError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(None);
        }
        let content =
            fs::read_to_string(&path).map_err(|e| StoreError::storage(key.as_str(), e))?;
        let value =
            serde_json::from_str(&content).map_err(|e| StoreError::storage(key.as_str(), e))?;
        Ok(Some(value))
    }

    fn write(&self, key: Key, value: &Value) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::storage(key.as_str(), e))?;
        let content =
            serde_json::to_string_pretty(value).map_err(|e| StoreError::storage(key.as_str(), e))?;
        fs::write(self.path(key), content).map_err(|e| StoreError::storage(key.as_str(), e))
    }

    fn remove(&self, key: Key) -> Result<(), StoreError> {
        let path = self.path(key);
        if !path.exists() {
            return Ok(());
        }
        fs::remove_file(path).map_err(|e| StoreError::storage(key.as_str(), e))
    }
}

#[cfg(test)]
mod tests {
    use super::JsonStorage;
    use crate::storage::{Key, Storage};
    use serde_json::json;

    #[test]
    fn read_missing_file_is_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path());
        assert!(storage.read(Key::Items).expect("read").is_none());
    }

    #[test]
    fn write_creates_directory_and_round_trips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path().join("nested/data"));
        let doc = json!([{"id": "a", "name": "Milk"}]);
        storage.write(Key::Items, &doc).expect("write");
        assert_eq!(storage.read(Key::Items).expect("read"), Some(doc));
    }

    #[test]
    fn corrupt_file_is_a_storage_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        std::fs::write(dir.path().join("locations.json"), "{not json").expect("write");
        let storage = JsonStorage::new(dir.path());
        assert!(storage.read(Key::Locations).is_err());
    }

    #[test]
    fn remove_deletes_and_tolerates_missing() {
        let dir = tempfile::tempdir().expect("tempdir");
        let storage = JsonStorage::new(dir.path());
        storage.write(Key::History, &json!([])).expect("write");
        storage.remove(Key::History).expect("remove");
        assert!(storage.read(Key::History).expect("read").is_none());
        storage.remove(Key::History).expect("second remove is a no-op");
    }
}
