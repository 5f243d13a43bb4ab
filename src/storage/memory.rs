//! In-memory store for tests and ephemeral runs.

use std::collections::HashMap;
use std::sync::Mutex;

use super::KeyValueStore;

/// HashMap-backed [`KeyValueStore`] with no persistence.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: String) {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .insert(key.to_string(), value);
    }

    fn remove(&self, key: &str) {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .remove(key);
    }

    fn keys(&self) -> Vec<String> {
        self.entries
            .lock()
            .expect("memory store lock poisoned")
            .keys()
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_roundtrip() {
        let store = MemoryStore::new();
        assert!(store.get("k").is_none());
        store.set("k", "v".into());
        assert_eq!(store.get("k").as_deref(), Some("v"));
    }

    #[test]
    fn test_set_overwrites() {
        let store = MemoryStore::new();
        store.set("k", "v1".into());
        store.set("k", "v2".into());
        assert_eq!(store.get("k").as_deref(), Some("v2"));
    }

    #[test]
    fn test_remove_and_keys() {
        let store = MemoryStore::new();
        store.set("a", "1".into());
        store.set("b", "2".into());
        store.remove("a");
        assert!(store.get("a").is_none());
        assert_eq!(store.keys(), vec!["b".to_string()]);
    }
}
