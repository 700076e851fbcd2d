//! Key-value stores for user defaults

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("settings I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("settings file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Store read at launch and written at shutdown
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<&Value>;
    fn set(&mut self, key: &str, value: Value);
    /// Make writes durable
    fn flush(&mut self) -> Result<(), PersistenceError>;

    fn read_int(&self, key: &str, default: i64) -> i64 {
        match self.get(key) {
            Some(Value::Number(n)) => n.as_i64().unwrap_or(default),
            Some(Value::Bool(b)) => i64::from(*b),
            _ => default,
        }
    }

    fn read_bool(&self, key: &str, default: bool) -> bool {
        match self.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_i64().map(|v| v != 0).unwrap_or(default),
            _ => default,
        }
    }

    fn write_int(&mut self, key: &str, value: i64) {
        self.set(key, Value::from(value));
    }

    fn write_bool(&mut self, key: &str, value: bool) {
        self.set(key, Value::Bool(value));
    }
}

/// Store that lives only as long as the process
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        Ok(())
    }
}

/// JSON object on disk, one key per setting
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// File for a defaults name, e.g. `dodgedanger` -> `dodgedanger.json`
    pub fn path_for(dir: &Path, defaults_name: &str) -> PathBuf {
        dir.join(format!("{defaults_name}.json"))
    }

    /// Open the store; a missing or corrupt file yields an empty store
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let values = match Self::read(&path) {
            Ok(values) => {
                log::info!("Loaded {} settings from {}", values.len(), path.display());
                values
            }
            Err(PersistenceError::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                BTreeMap::new()
            }
            Err(e) => {
                log::warn!("Ignoring settings at {}: {}", path.display(), e);
                BTreeMap::new()
            }
        };
        Self { path, values }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(path: &Path) -> Result<BTreeMap<String, Value>, PersistenceError> {
        let json = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&json)?)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn flush(&mut self) -> Result<(), PersistenceError> {
        let json = serde_json::to_string_pretty(&self.values)?;
        // tmp -> settings
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Settings saved to {}", self.path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_path(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or_default();
        let pid = std::process::id();
        std::env::temp_dir().join(format!("dodge-danger-{name}-{pid}-{nanos}.json"))
    }

    #[test]
    fn test_memory_store_defaults() {
        let mut store = MemoryStore::default();
        assert_eq!(store.read_int("high_score", 7), 7);
        assert!(store.read_bool("fullscreen", true));

        store.write_int("high_score", 42);
        store.write_bool("fullscreen", false);
        assert_eq!(store.read_int("high_score", 0), 42);
        assert!(!store.read_bool("fullscreen", true));
    }

    #[test]
    fn test_ill_typed_values_fall_back() {
        let mut store = MemoryStore::default();
        store.set("high_score", Value::from("lots"));
        store.set("fullscreen", Value::from(1));
        assert_eq!(store.read_int("high_score", 3), 3);
        assert!(store.read_bool("fullscreen", false));
    }

    #[test]
    fn test_missing_file_is_empty() {
        let store = JsonFileStore::open(temp_path("missing"));
        assert!(store.get("high_score").is_none());
    }

    #[test]
    fn test_corrupt_file_is_empty() {
        let path = temp_path("corrupt");
        fs::write(&path, "{ not json").unwrap();
        let store = JsonFileStore::open(&path);
        assert_eq!(store.read_int("high_score", 0), 0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_flush_then_reopen() {
        let path = temp_path("flush");
        let mut store = JsonFileStore::open(&path);
        store.write_int("window_width", 1024);
        store.write_bool("fullscreen", true);
        store.flush().unwrap();

        let reopened = JsonFileStore::open(&path);
        assert_eq!(reopened.read_int("window_width", 0), 1024);
        assert!(reopened.read_bool("fullscreen", false));
        fs::remove_file(&path).unwrap();
    }
}
