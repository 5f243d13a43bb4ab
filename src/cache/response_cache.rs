//! API response cache with per-namespace TTL expiry.
//!
//! Entries live in the shared [`KeyValueStore`] as `{ data, timestamp }`
//! JSON records under keys prefixed by their namespace (`analytics_*`,
//! `ai_*`, `kcse_*`). Expiry is checked lazily at read time; there is no
//! background sweep. The store and the time source are injected so tests
//! run against an in-memory store and a hand-cranked clock.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::Result;
use crate::storage::KeyValueStore;
use crate::utils::Clock;

use super::key::cache_key;

/// Namespace prefix for analytics responses (5 minute TTL).
pub const ANALYTICS_NAMESPACE: &str = "analytics_";
/// Namespace prefix for AI responses (10 minute TTL).
pub const AI_NAMESPACE: &str = "ai_";
/// Namespace prefix for KCSE guidance responses (10 minute TTL).
pub const KCSE_NAMESPACE: &str = "kcse_";

/// TTL applied to namespaces with no registered configuration.
const FALLBACK_TTL: Duration = Duration::from_secs(5 * 60);

static DEFAULT_TTLS: Lazy<Vec<(&'static str, Duration)>> = Lazy::new(|| {
    vec![
        (ANALYTICS_NAMESPACE, Duration::from_secs(5 * 60)),
        (AI_NAMESPACE, Duration::from_secs(10 * 60)),
        (KCSE_NAMESPACE, Duration::from_secs(10 * 60)),
    ]
});

/// Stored record shape: `{ "data": <payload>, "timestamp": <ms epoch> }`.
#[derive(Debug, Serialize, Deserialize)]
struct StoredEntry {
    data: Value,
    timestamp: u64,
}

/// Memoizes successful API responses for a bounded freshness window.
///
/// A miss is a normal outcome, never an error; the only failure this
/// component produces is [`crate::error::PathError::CacheKey`] when the
/// parameters cannot be canonicalized, and callers respond to that by
/// skipping the cache entirely.
pub struct ResponseCache {
    store: Arc<dyn KeyValueStore>,
    clock: Arc<dyn Clock>,
    ttls: HashMap<String, Duration>,
}

impl ResponseCache {
    /// Build a cache over `store` with the default namespace TTLs.
    pub fn new(store: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        let ttls = DEFAULT_TTLS
            .iter()
            .map(|(ns, ttl)| (ns.to_string(), *ttl))
            .collect();
        Self { store, clock, ttls }
    }

    /// Override the TTL for one namespace (builder style, used by config).
    pub fn with_ttl(mut self, namespace: &str, ttl: Duration) -> Self {
        self.ttls.insert(namespace.to_string(), ttl);
        self
    }

    /// Look up a fresh entry for `(namespace, operation, params)`.
    ///
    /// Returns `Ok(None)` on a miss or when the entry has aged past the
    /// namespace TTL; an expired entry is deleted on the spot. An entry is
    /// fresh iff `now - timestamp < ttl`.
    pub fn get<P: Serialize>(
        &self,
        namespace: &str,
        operation: &str,
        params: &P,
    ) -> Result<Option<Value>> {
        let key = cache_key(namespace, operation, params)?;
        let raw = match self.store.get(&key) {
            Some(raw) => raw,
            None => {
                debug!(namespace, operation, "cache miss");
                return Ok(None);
            }
        };

        let entry: StoredEntry = match serde_json::from_str(&raw) {
            Ok(entry) => entry,
            Err(e) => {
                warn!(key = %key, "corrupt cache entry, removing: {}", e);
                self.store.remove(&key);
                return Ok(None);
            }
        };

        let age = self.clock.now_ms().saturating_sub(entry.timestamp);
        if age >= self.ttl_for(namespace).as_millis() as u64 {
            debug!(namespace, operation, age_ms = age, "cache entry expired, removing");
            self.store.remove(&key);
            return Ok(None);
        }

        debug!(namespace, operation, age_ms = age, "cache hit");
        Ok(Some(entry.data))
    }

    /// Store `payload` for `(namespace, operation, params)`, overwriting
    /// any prior entry for that key.
    pub fn set<P: Serialize>(
        &self,
        namespace: &str,
        operation: &str,
        params: &P,
        payload: &Value,
    ) -> Result<()> {
        let key = cache_key(namespace, operation, params)?;
        let entry = StoredEntry {
            data: payload.clone(),
            timestamp: self.clock.now_ms(),
        };
        // StoredEntry serialization cannot fail: both fields are plain JSON.
        let raw = serde_json::to_string(&entry).unwrap_or_default();
        self.store.set(&key, raw);
        debug!(namespace, operation, "cached response");
        Ok(())
    }

    /// Remove every entry whose key starts with `namespace`.
    ///
    /// Returns the number of entries removed. Used for explicit refresh
    /// actions and privacy-driven clearing of AI-derived data.
    pub fn clear(&self, namespace: &str) -> usize {
        let mut removed = 0;
        for key in self.store.keys() {
            if key.starts_with(namespace) {
                self.store.remove(&key);
                removed += 1;
            }
        }
        debug!(namespace, removed, "cleared cache namespace");
        removed
    }

    /// Remove every entry in every registered namespace.
    ///
    /// Un-prefixed keys sharing the store (session, token, theme) are
    /// untouched.
    pub fn clear_all(&self) -> usize {
        let namespaces: Vec<String> = self.ttls.keys().cloned().collect();
        namespaces.iter().map(|ns| self.clear(ns)).sum()
    }

    /// Per-namespace entry counts.
    pub fn stats(&self) -> CacheStats {
        let keys = self.store.keys();
        let mut per_namespace: Vec<(String, usize)> = self
            .ttls
            .keys()
            .map(|ns| (ns.clone(), keys.iter().filter(|k| k.starts_with(ns)).count()))
            .collect();
        per_namespace.sort_by(|a, b| a.0.cmp(&b.0));
        let total_entries = per_namespace.iter().map(|(_, n)| n).sum();
        CacheStats {
            total_entries,
            per_namespace,
        }
    }

    fn ttl_for(&self, namespace: &str) -> Duration {
        self.ttls.get(namespace).copied().unwrap_or(FALLBACK_TTL)
    }
}

/// Aggregate cache statistics for the `cache stats` command.
#[derive(Debug, Clone)]
pub struct CacheStats {
    /// Entries across all registered namespaces.
    pub total_entries: usize,
    /// `(namespace, entry count)` pairs, sorted by namespace.
    pub per_namespace: Vec<(String, usize)>,
}
