//! JSON-file-backed store.
//!
//! Persists to a single JSON object file (`~/.pathfinder/storage.json` by
//! default). The whole map is held in memory and flushed after every
//! mutation; a corrupt or unreadable file starts empty with a warning
//! rather than failing the application.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::warn;

use super::KeyValueStore;

/// Durable [`KeyValueStore`] serialized to a JSON file.
pub struct FileStore {
    entries: Mutex<HashMap<String, String>>,
    path: PathBuf,
}

impl FileStore {
    /// Open (or create) the store at `path`, loading any existing entries.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = Self::load_from_disk(&path);
        Self {
            entries: Mutex::new(entries),
            path,
        }
    }

    fn load_from_disk(path: &Path) -> HashMap<String, String> {
        match std::fs::read_to_string(path) {
            Ok(data) => match serde_json::from_str(&data) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!("storage file is corrupt, starting empty: {}", e);
                    HashMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(e) => {
                warn!("failed to read storage file, starting empty: {}", e);
                HashMap::new()
            }
        }
    }

    fn save_to_disk(&self, entries: &HashMap<String, String>) {
        if let Some(parent) = self.path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        match serde_json::to_string_pretty(entries) {
            Ok(data) => {
                if let Err(e) = std::fs::write(&self.path, data) {
                    warn!("failed to save storage file: {}", e);
                }
            }
            Err(e) => warn!("failed to serialize storage file: {}", e),
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("file store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        let mut entries = self.entries.lock().expect("file store lock poisoned");
        entries.insert(key.to_string(), value);
        self.save_to_disk(&entries);
    }

    fn remove(&self, key: &str) {
        let mut entries = self.entries.lock().expect("file store lock poisoned");
        if entries.remove(key).is_some() {
            self.save_to_disk(&entries);
        }
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("file store lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}
