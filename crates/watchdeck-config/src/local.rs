//! JSON-backed local key/value store for per-user persisted state
//! (widget preferences, last-selected views, and the like).
//!
//! Reads are forgiving: a missing file, corrupt JSON, an absent key, or a
//! value of the wrong shape all yield the caller-supplied default. Writes
//! rewrite the whole file.

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::ConfigError;

const STORE_FILE: &str = "local.json";

pub struct LocalStore {
    path: PathBuf,
}

impl LocalStore {
    /// Store backed by the platform data directory.
    pub fn open_default() -> Self {
        Self {
            path: crate::data_dir().join(STORE_FILE),
        }
    }

    /// Store backed by an explicit file path.
    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read `key`, returning `default` when the file, key, or expected
    /// shape is not there.
    pub fn get<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        self.read_map()
            .remove(key)
            .and_then(|value| serde_json::from_value(value).ok())
            .unwrap_or(default)
    }

    /// Write `key`, creating the file (and parent directories) as needed.
    pub fn set<T: Serialize>(&self, key: &str, value: &T) -> Result<(), ConfigError> {
        let mut map = self.read_map();
        map.insert(
            key.to_owned(),
            serde_json::to_value(value).map_err(|e| ConfigError::Validation {
                field: key.to_owned(),
                reason: e.to_string(),
            })?,
        );
        self.write_map(&map)
    }

    /// Delete `key`. Absent keys are a no-op.
    pub fn remove(&self, key: &str) -> Result<(), ConfigError> {
        let mut map = self.read_map();
        if map.remove(key).is_none() {
            return Ok(());
        }
        self.write_map(&map)
    }

    // Corrupt or missing files read as empty.
    fn read_map(&self) -> Map<String, Value> {
        std::fs::read_to_string(&self.path)
            .ok()
            .and_then(|text| serde_json::from_str::<Value>(&text).ok())
            .and_then(|value| match value {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .unwrap_or_default()
    }

    fn write_map(&self, map: &Map<String, Value>) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let text = serde_json::to_string_pretty(&Value::Object(map.clone()))
            .map_err(|e| ConfigError::Validation {
                field: "local store".into(),
                reason: e.to_string(),
            })?;
        std::fs::write(&self.path, text)?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> LocalStore {
        LocalStore::at(dir.path().join("local.json"))
    }

    #[test]
    fn missing_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        assert_eq!(store.get("view", "dashboard".to_owned()), "dashboard");
        assert!(store.get("auto_refresh", true));
    }

    #[test]
    fn set_then_get_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        store.set("view", &"ssl").unwrap();
        store.set("auto_refresh", &false).unwrap();

        assert_eq!(store.get("view", "dashboard".to_owned()), "ssl");
        assert!(!store.get("auto_refresh", true));
    }

    #[test]
    fn corrupt_file_reads_as_default_and_recovers_on_write() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        std::fs::write(store.path(), "{not json").unwrap();

        assert_eq!(store.get("view", "dashboard".to_owned()), "dashboard");

        store.set("view", &"uptime").unwrap();
        assert_eq!(store.get("view", String::new()), "uptime");
    }

    #[test]
    fn wrong_shape_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("auto_refresh", &"yes please").unwrap();

        // Stored a string, asked for a bool.
        assert!(store.get("auto_refresh", true));
    }

    #[test]
    fn remove_deletes_only_the_named_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.set("a", &1).unwrap();
        store.set("b", &2).unwrap();

        store.remove("a").unwrap();
        store.remove("never existed").unwrap();

        assert_eq!(store.get("a", 0), 0);
        assert_eq!(store.get("b", 0), 2);
    }
}
