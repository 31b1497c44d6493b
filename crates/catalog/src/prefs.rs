//! User preference persistence.
//!
//! Starred capabilities and dismissed featured tiles are kept in memory for
//! the session and written through to a key-value store after every mutation.
//! Store failures are logged and otherwise ignored; the in-memory state stays
//! authoritative.

use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use launchpad_core::{AppError, AppResult};

/// Storage key for starred capability ids.
pub const STARRED_KEY: &str = "launchpad.starredCapabilities";

/// Storage key for dismissed featured tile ids.
pub const DISMISSED_KEY: &str = "launchpad.dismissedFeaturedTiles";

/// String-keyed persistence backend for preferences.
pub trait PreferenceStore: Send + Sync {
    fn read(&self, key: &str) -> AppResult<Option<String>>;
    fn write(&mut self, key: &str, value: &str) -> AppResult<()>;
}

/// In-memory store, used in tests and as an ephemeral fallback.
#[derive(Debug, Default)]
pub struct MemoryPreferenceStore {
    entries: HashMap<String, String>,
}

impl MemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-seed an entry, e.g. to simulate corrupt persisted state.
    pub fn with_entry(mut self, key: &str, value: &str) -> Self {
        self.entries.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryPreferenceStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// File-backed store keeping one JSON file per key under a data directory.
#[derive(Debug)]
pub struct FilePreferenceStore {
    dir: PathBuf,
}

impl FilePreferenceStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl PreferenceStore for FilePreferenceStore {
    fn read(&self, key: &str) -> AppResult<Option<String>> {
        let path = self.entry_path(key);
        if !path.exists() {
            return Ok(None);
        }

        std::fs::read_to_string(&path)
            .map(Some)
            .map_err(|e| AppError::Preferences(format!("Failed to read {:?}: {}", path, e)))
    }

    fn write(&mut self, key: &str, value: &str) -> AppResult<()> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Preferences(format!("Failed to create {:?}: {}", self.dir, e)))?;

        let path = self.entry_path(key);
        std::fs::write(&path, value)
            .map_err(|e| AppError::Preferences(format!("Failed to write {:?}: {}", path, e)))
    }
}

/// Session-local user preferences.
pub struct UserPreferences {
    starred: HashSet<String>,
    dismissed: HashSet<String>,
    store: Box<dyn PreferenceStore>,
}

impl UserPreferences {
    /// Load preferences from a store.
    ///
    /// Missing or corrupt entries are treated as empty, never as errors.
    pub fn load(store: Box<dyn PreferenceStore>) -> Self {
        let starred = read_id_set(store.as_ref(), STARRED_KEY);
        let dismissed = read_id_set(store.as_ref(), DISMISSED_KEY);

        tracing::debug!(
            "Loaded preferences: {} starred, {} dismissed",
            starred.len(),
            dismissed.len()
        );

        Self {
            starred,
            dismissed,
            store,
        }
    }

    /// Starred capability ids.
    pub fn starred(&self) -> &HashSet<String> {
        &self.starred
    }

    pub fn is_starred(&self, id: &str) -> bool {
        self.starred.contains(id)
    }

    /// Dismissed featured tile ids.
    pub fn dismissed(&self) -> &HashSet<String> {
        &self.dismissed
    }

    pub fn is_dismissed(&self, id: &str) -> bool {
        self.dismissed.contains(id)
    }

    /// Toggle the star on a capability; returns whether it is now starred.
    pub fn toggle_star(&mut self, id: &str) -> bool {
        let now_starred = if self.starred.remove(id) {
            false
        } else {
            self.starred.insert(id.to_string());
            true
        };

        let ids = sorted_ids(&self.starred);
        self.persist(STARRED_KEY, &ids);
        now_starred
    }

    /// Dismiss a featured tile by id.
    pub fn dismiss_featured(&mut self, id: &str) {
        if self.dismissed.insert(id.to_string()) {
            let ids = sorted_ids(&self.dismissed);
            self.persist(DISMISSED_KEY, &ids);
        }
    }

    /// Write one id set through to the store; failures only warn.
    fn persist(&mut self, key: &str, ids: &[String]) {
        let json = match serde_json::to_string(ids) {
            Ok(json) => json,
            Err(err) => {
                tracing::warn!("Failed to encode preference {}: {}", key, err);
                return;
            }
        };

        if let Err(err) = self.store.write(key, &json) {
            tracing::warn!("Failed to persist preference {}: {}", key, err);
        }
    }
}

fn sorted_ids(set: &HashSet<String>) -> Vec<String> {
    let mut ids: Vec<String> = set.iter().cloned().collect();
    ids.sort();
    ids
}

fn read_id_set(store: &dyn PreferenceStore, key: &str) -> HashSet<String> {
    match store.read(key) {
        Ok(Some(raw)) => match serde_json::from_str::<Vec<String>>(&raw) {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                tracing::warn!("Corrupt preference entry {}: {}", key, err);
                HashSet::new()
            }
        },
        Ok(None) => HashSet::new(),
        Err(err) => {
            tracing::warn!("Failed to read preference {}: {}", key, err);
            HashSet::new()
        }
    }
}
