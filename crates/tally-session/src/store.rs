//! Key-value persistence for session state.
//!
//! The host decides where state lives; the session only needs a store of
//! JSON values by key. [`MemoryStore`] keeps them in memory and
//! [`JsonFileStore`] writes them through to a single pretty-printed file.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tally_mechanics::{PresetBook, RollPreset};

use crate::error::SessionResult;

/// Key holding the character record.
pub const CHARACTER_KEY: &str = "character";
/// Key holding the roll history.
pub const ROLL_HISTORY_KEY: &str = "rollHistory";
/// Key holding the action history.
pub const ACTION_HISTORY_KEY: &str = "actionHistory";
/// Key holding the roll presets.
pub const PRESETS_KEY: &str = "rollPresets";
/// Key holding the session configuration.
pub const SETTINGS_KEY: &str = "settings";
/// Key holding how far a seeded roll sequence has advanced.
pub const ROLL_CURSOR_KEY: &str = "rollCursor";

/// A store of JSON values by key.
pub trait KeyValueStore {
    /// Read a value. A missing key is `Ok(None)`.
    fn get(&self, key: &str) -> SessionResult<Option<Value>>;

    /// Write a value, replacing any previous one.
    fn set(&mut self, key: &str, value: Value) -> SessionResult<()>;

    /// Delete a key. Deleting a missing key is not an error.
    fn remove(&mut self, key: &str) -> SessionResult<()>;
}

/// An in-memory store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, Value>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> SessionResult<()> {
        self.values.insert(key.to_string(), value);
        Ok(())
    }

    fn remove(&mut self, key: &str) -> SessionResult<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// A store backed by one JSON object on disk. Every write rewrites the file.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, Value>,
}

impl JsonFileStore {
    /// Open a store file. A missing file is an empty store; it is created
    /// on the first write.
    pub fn open(path: impl AsRef<Path>) -> SessionResult<Self> {
        let path = path.as_ref().to_path_buf();
        let values = if path.exists() {
            let text = fs::read_to_string(&path)?;
            if text.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&text)?
            }
        } else {
            BTreeMap::new()
        };
        tracing::debug!(path = %path.display(), keys = values.len(), "store opened");
        Ok(Self { path, values })
    }

    /// The backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether a key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    fn flush(&self) -> SessionResult<()> {
        let text = serde_json::to_string_pretty(&self.values)?;
        fs::write(&self.path, text)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> SessionResult<Option<Value>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> SessionResult<()> {
        self.values.insert(key.to_string(), value);
        self.flush()
    }

    fn remove(&mut self, key: &str) -> SessionResult<()> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}

/// Load the preset book. Unreadable or malformed data yields an empty book.
pub fn load_presets<S: KeyValueStore + ?Sized>(store: &S, capacity: usize) -> PresetBook {
    let stored = match store.get(PRESETS_KEY) {
        Ok(Some(value)) => value,
        Ok(None) => return PresetBook::with_capacity(capacity),
        Err(e) => {
            tracing::warn!(error = %e, "could not read presets");
            return PresetBook::with_capacity(capacity);
        }
    };
    match serde_json::from_value::<Vec<RollPreset>>(stored) {
        Ok(presets) => PresetBook::from_presets(presets, capacity),
        Err(e) => {
            tracing::warn!(error = %e, "ignoring malformed presets");
            PresetBook::with_capacity(capacity)
        }
    }
}

/// Save the preset book, removing the key when the book is empty.
pub fn save_presets<S: KeyValueStore + ?Sized>(store: &mut S, book: &PresetBook) -> SessionResult<()> {
    if book.is_empty() {
        return store.remove(PRESETS_KEY);
    }
    store.set(PRESETS_KEY, serde_json::to_value(book.as_slice())?)
}
