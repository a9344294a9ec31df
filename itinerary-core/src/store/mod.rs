//! Persistence port and the two user-editable stores.
//!
//! Stores receive their backing key-value store at construction, hydrate from it
//! once, and write their whole map back on every mutation.

mod assignments;
mod notes;

pub use assignments::AssignmentStore;
pub use notes::NotesStore;

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{ItineraryError, ItineraryResult};

/// A string key-value store, the only thing the stores know about persistence.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> ItineraryResult<Option<String>>;
    fn set(&mut self, key: &str, value: &str) -> ItineraryResult<()>;
    fn clear(&mut self, key: &str) -> ItineraryResult<()>;
}

/// In-memory store. Nothing survives the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> ItineraryResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> ItineraryResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self, key: &str) -> ItineraryResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key inside a state directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> ItineraryResult<Option<String>> {
        let path = self.path_for(key);
        if !path.exists() {
            return Ok(None);
        }
        Ok(Some(std::fs::read_to_string(&path)?))
    }

    fn set(&mut self, key: &str, value: &str) -> ItineraryResult<()> {
        std::fs::create_dir_all(&self.dir).map_err(|e| {
            ItineraryError::Persistence(format!(
                "Could not create state directory {}: {e}",
                self.dir.display()
            ))
        })?;

        let path = self.path_for(key);
        let temp = self.dir.join(format!("{key}.json.tmp"));

        std::fs::write(&temp, value)?;
        std::fs::rename(&temp, &path)?;
        Ok(())
    }

    fn clear(&mut self, key: &str) -> ItineraryResult<()> {
        let path = self.path_for(key);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }
}

/// Read a JSON object map. Absent, unreadable or malformed state reads as empty.
pub(crate) fn read_map<S, V>(port: &S, key: &str) -> BTreeMap<String, V>
where
    S: KeyValueStore,
    V: DeserializeOwned,
{
    let raw = match port.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => return BTreeMap::new(),
        Err(error) => {
            tracing::warn!(key, %error, "could not read persisted state, starting empty");
            return BTreeMap::new();
        }
    };

    match serde_json::from_str(&raw) {
        Ok(map) => map,
        Err(error) => {
            tracing::warn!(key, %error, "ignoring malformed persisted state");
            BTreeMap::new()
        }
    }
}

/// Serialize and store the entire map under `key`.
pub(crate) fn write_map<S, V>(port: &mut S, key: &str, map: &BTreeMap<String, V>) -> ItineraryResult<()>
where
    S: KeyValueStore,
    V: Serialize,
{
    let raw =
        serde_json::to_string(map).map_err(|e| ItineraryError::Serialization(e.to_string()))?;
    port.set(key, &raw)?;
    tracing::debug!(key, entries = map.len(), "persisted map");
    Ok(())
}
