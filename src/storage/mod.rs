//! Durable key-value storage shared by the response cache and session state.
//!
//! One flat string-keyed medium, mirroring the browser storage the
//! dashboard originally persisted into. Cache entries live under
//! namespace-prefixed keys (`analytics_*`, `ai_*`, `kcse_*`); the session
//! record, bearer token, and display theme use reserved un-prefixed keys.
//! Collisions are avoided by that convention, not enforced here.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

/// Object-safe storage seam. Writes never fail the caller: implementations
/// log persistence problems and keep the in-memory view authoritative.
pub trait KeyValueStore: Send + Sync {
    /// Read the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Insert or overwrite `key`.
    fn set(&self, key: &str, value: String);

    /// Remove `key` if present.
    fn remove(&self, key: &str);

    /// Snapshot of every key currently stored.
    fn keys(&self) -> Vec<String>;
}
