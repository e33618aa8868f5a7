//! Durable client-side cache.
//!
//! Models the browser's local storage: synchronous string key/value access
//! behind an injected trait, with typed JSON lists layered on top. Reads of
//! absent or corrupt values yield empty collections; writes replace the
//! whole value (read, append, write back), so concurrent processes sharing
//! one store are last-writer-wins.

use std::collections::{BTreeMap, HashMap};
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Badge, Memory, Rsvp};

/// Cache key for the RSVP list.
pub const RSVPS_KEY: &str = "pr_party_rsvps";
/// Cache key for the memory list.
pub const MEMORIES_KEY: &str = "pr_party_memories";
/// Cache key for the name-keyed badge map.
pub const BADGES_KEY: &str = "pr_party_badges";

/// String key/value storage with durable-enough semantics for a client
/// session. Synchronous by design: the submitting flow must not await the
/// network to consider a submission recorded.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> io::Result<()>;
}

/// Store backed by one JSON file per key under a directory.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        std::fs::read_to_string(self.path_for(key)).ok()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        std::fs::create_dir_all(&self.dir)?;
        std::fs::write(self.path_for(key), value)
    }
}

/// In-memory store, the test double.
#[derive(Default)]
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
        self.entries.lock().unwrap().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> io::Result<()> {
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Typed view over the key/value store: the two submission lists and the
/// badge map.
pub struct LocalCache {
    store: Box<dyn KeyValueStore>,
}

impl LocalCache {
    pub fn new(store: Box<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Cached RSVP list, oldest first.
    pub fn rsvps(&self) -> Vec<Rsvp> {
        self.read_json(RSVPS_KEY)
    }

    /// Cached memory list, oldest first.
    pub fn memories(&self) -> Vec<Memory> {
        self.read_json(MEMORIES_KEY)
    }

    /// Append an RSVP to the cached list.
    pub fn push_rsvp(&self, rsvp: &Rsvp) -> io::Result<()> {
        let mut list = self.rsvps();
        list.push(rsvp.clone());
        self.write_json(RSVPS_KEY, &list)
    }

    /// Append a memory to the cached list.
    pub fn push_memory(&self, memory: &Memory) -> io::Result<()> {
        let mut list = self.memories();
        list.push(memory.clone());
        self.write_json(MEMORIES_KEY, &list)
    }

    /// The name-keyed badge map.
    pub fn badges(&self) -> BTreeMap<String, Badge> {
        self.read_json(BADGES_KEY)
    }

    /// Record a badge under the guest name, overwriting any previous badge
    /// for that name.
    pub fn record_badge(&self, name: &str, badge: &Badge) -> io::Result<()> {
        let mut badges = self.badges();
        badges.insert(name.to_string(), badge.clone());
        self.write_json(BADGES_KEY, &badges)
    }

    fn read_json<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.store.get(key) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                tracing::warn!("discarding corrupt cache entry {}: {}", key, err);
                T::default()
            }),
            None => T::default(),
        }
    }

    fn write_json<T: Serialize>(&self, key: &str, value: &T) -> io::Result<()> {
        let raw = serde_json::to_string(value).map_err(io::Error::other)?;
        self.store.set(key, &raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_rsvp(id: i64) -> Rsvp {
        Rsvp {
            id,
            full_name: "Amari Lee".to_string(),
            phone: "5551234567".to_string(),
            guests: 2,
            dietary: None,
            message: None,
            created_at: "2025-06-01T12:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn test_absent_key_reads_empty() {
        let cache = LocalCache::new(Box::new(MemoryStore::new()));
        assert!(cache.rsvps().is_empty());
        assert!(cache.memories().is_empty());
        assert!(cache.badges().is_empty());
    }

    #[test]
    fn test_corrupt_value_reads_empty() {
        let store = MemoryStore::new();
        store.set(RSVPS_KEY, "{definitely not json").unwrap();
        let cache = LocalCache::new(Box::new(store));
        assert!(cache.rsvps().is_empty());
    }

    #[test]
    fn test_push_then_read_round_trips() {
        let cache = LocalCache::new(Box::new(MemoryStore::new()));
        cache.push_rsvp(&sample_rsvp(1)).unwrap();
        cache.push_rsvp(&sample_rsvp(2)).unwrap();

        let list = cache.rsvps();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].id, 1);
        assert_eq!(list[1].id, 2);
    }

    #[test]
    fn test_badge_map_overwrites_by_name() {
        let cache = LocalCache::new(Box::new(MemoryStore::new()));
        let first = Badge::for_name("Sam Park");
        let second = Badge::for_name("Sam Park");

        cache.record_badge("Sam Park", &first).unwrap();
        cache.record_badge("Sam Park", &second).unwrap();

        let badges = cache.badges();
        assert_eq!(badges.len(), 1);
        assert_eq!(badges.get("Sam Park").unwrap(), &second);
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();

        {
            let cache = LocalCache::new(Box::new(JsonFileStore::new(dir.path().to_path_buf())));
            cache.push_rsvp(&sample_rsvp(7)).unwrap();
        }

        let cache = LocalCache::new(Box::new(JsonFileStore::new(dir.path().to_path_buf())));
        assert_eq!(cache.rsvps()[0].id, 7);
    }
}
