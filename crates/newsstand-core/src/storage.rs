//! Persistent key-value storage.
//!
//! Values are JSON strings keyed by name, the same shape a browser's local
//! storage would hold.

use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Key holding the JSON array of favorited entry names.
pub const FAVORITES_KEY: &str = "favorites";
/// Key holding the JSON array of user-added entries.
pub const ADDED_ENTRIES_KEY: &str = "addedNewspapers";
/// Key holding the theme preference.
pub const THEME_KEY: &str = "theme";

/// Synchronous string key-value store.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;
}

/// Store backed by a single JSON object file, rewritten on every write.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, PersistenceError> {
        let path = path.as_ref().to_path_buf();

        let values = if path.exists() {
            let contents = std::fs::read_to_string(&path).map_err(|source| PersistenceError::Io {
                path: path.display().to_string(),
                source,
            })?;
            serde_json::from_str(&contents).map_err(|source| PersistenceError::Decode {
                key: path.display().to_string(),
                source,
            })?
        } else {
            BTreeMap::new()
        };

        tracing::debug!("Opened storage {} with {} keys", path.display(), values.len());
        Ok(Self { path, values })
    }

    /// Default location under the user's data directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::data_dir().map(|dir| dir.join("newsstand").join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self, values: &BTreeMap<String, String>) -> Result<(), PersistenceError> {
        let io_err = |source| PersistenceError::Io {
            path: self.path.display().to_string(),
            source,
        };

        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }

        let contents =
            serde_json::to_string_pretty(values).map_err(|source| PersistenceError::Encode {
                key: self.path.display().to_string(),
                source,
            })?;

        std::fs::write(&self.path, contents).map_err(io_err)
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    /// The new value is only kept once it is on disk.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut values = self.values.clone();
        values.insert(key.to_string(), value.to_string());
        self.flush(&values)?;
        self.values = values;
        Ok(())
    }
}

/// In-memory store. Lives for the process only.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
    read_only: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A store that rejects every write, for exercising failure paths.
    pub fn read_only() -> Self {
        Self {
            values: BTreeMap::new(),
            read_only: true,
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        if self.read_only {
            return Err(PersistenceError::Rejected(key.to_string()));
        }
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }
}

/// Read and decode a JSON value stored under `key`.
pub fn read_json<T, S>(store: &S, key: &str) -> Result<Option<T>, PersistenceError>
where
    T: serde::de::DeserializeOwned,
    S: KeyValueStore + ?Sized,
{
    let Some(raw) = store.get(key)? else {
        return Ok(None);
    };

    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| PersistenceError::Decode {
            key: key.to_string(),
            source,
        })
}

/// Encode `value` as JSON and store it under `key`.
pub fn write_json<T, S>(store: &mut S, key: &str, value: &T) -> Result<(), PersistenceError>
where
    T: serde::Serialize + ?Sized,
    S: KeyValueStore + ?Sized,
{
    let raw = serde_json::to_string(value).map_err(|source| PersistenceError::Encode {
        key: key.to_string(),
        source,
    })?;
    store.set(key, &raw)
}
