//! In-memory and failing backends for tests and local runs.

use crate::{CacheEntry, CacheError, CacheManager, CacheResult, KeyValueStore, NamedCache};
use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
struct StoredValue {
    value: String,
    ttl: Duration,
    expires_at: Instant,
}

impl StoredValue {
    fn is_live(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// In-process [`KeyValueStore`] with per-key expiry and glob scans.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, StoredValue>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a raw value, bypassing the cache envelope.
    pub fn insert_raw(&self, key: impl Into<String>, value: impl Into<String>, ttl: Duration) {
        self.entries.write().insert(
            key.into(),
            StoredValue {
                value: value.into(),
                ttl,
                expires_at: Instant::now() + ttl,
            },
        );
    }

    /// TTL a live key was written with.
    #[must_use]
    pub fn ttl_of(&self, key: &str) -> Option<Duration> {
        let now = Instant::now();
        self.entries
            .read()
            .get(key)
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.ttl)
    }

    /// Whether a live value exists under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.ttl_of(key).is_some()
    }

    /// Live keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let now = Instant::now();
        let mut keys: Vec<String> = self
            .entries
            .read()
            .iter()
            .filter(|(_, stored)| stored.is_live(now))
            .map(|(key, _)| key.clone())
            .collect();
        keys.sort();
        keys
    }

    /// Number of live keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.keys().len()
    }

    /// Whether the store holds no live keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl KeyValueStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        let now = Instant::now();
        Ok(self
            .entries
            .read()
            .get(key)
            .filter(|stored| stored.is_live(now))
            .map(|stored| stored.value.clone()))
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.insert_raw(key, value, ttl);
        Ok(())
    }

    async fn delete(&self, keys: &[String]) -> CacheResult<u64> {
        let now = Instant::now();
        let mut entries = self.entries.write();
        let deleted = keys
            .iter()
            .filter_map(|key| entries.remove(key))
            .filter(|stored| stored.is_live(now))
            .count();
        Ok(deleted as u64)
    }

    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>> {
        Ok(self
            .keys()
            .into_iter()
            .filter(|key| glob_match(pattern, key))
            .collect())
    }
}

/// Redis-style glob match supporting `*` and `?`.
fn glob_match(pattern: &str, text: &str) -> bool {
    let pattern: Vec<char> = pattern.chars().collect();
    let text: Vec<char> = text.chars().collect();
    let (mut p, mut t) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while t < text.len() {
        match pattern.get(p) {
            Some('*') => {
                backtrack = Some((p, t));
                p += 1;
            }
            Some(&c) if c == '?' || c == text[t] => {
                p += 1;
                t += 1;
            }
            _ => match backtrack {
                Some((star, matched)) => {
                    p = star + 1;
                    t = matched + 1;
                    backtrack = Some((star, matched + 1));
                }
                None => return false,
            },
        }
    }

    pattern[p..].iter().all(|&c| c == '*')
}

/// [`KeyValueStore`] whose every operation fails.
#[derive(Debug, Clone, Default)]
pub struct FailingStore;

#[async_trait]
impl KeyValueStore for FailingStore {
    async fn get(&self, _key: &str) -> CacheResult<Option<String>> {
        Err(CacheError::backend("store unavailable"))
    }

    async fn set_ex(&self, _key: &str, _value: &str, _ttl: Duration) -> CacheResult<()> {
        Err(CacheError::backend("store unavailable"))
    }

    async fn delete(&self, _keys: &[String]) -> CacheResult<u64> {
        Err(CacheError::backend("store unavailable"))
    }

    async fn scan_keys(&self, _pattern: &str) -> CacheResult<Vec<String>> {
        Err(CacheError::backend("store unavailable"))
    }
}

/// [`NamedCache`] whose every operation fails.
#[derive(Debug, Clone)]
pub struct FailingNamedCache {
    name: String,
}

impl FailingNamedCache {
    /// Creates a failing cache with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

#[async_trait]
impl NamedCache for FailingNamedCache {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, _key: &str) -> CacheResult<Option<CacheEntry>> {
        Err(CacheError::backend("cache unavailable"))
    }

    async fn put(&self, _key: String, _entry: CacheEntry) -> CacheResult<()> {
        Err(CacheError::backend("cache unavailable"))
    }

    async fn evict(&self, _key: &str) -> CacheResult<()> {
        Err(CacheError::backend("cache unavailable"))
    }

    async fn clear(&self) -> CacheResult<()> {
        Err(CacheError::backend("cache unavailable"))
    }
}

/// [`CacheManager`] that either hands out failing caches or fails to resolve.
#[derive(Debug, Clone)]
pub struct FailingCacheManager {
    resolve: bool,
}

impl FailingCacheManager {
    /// Resolves every name to a [`FailingNamedCache`].
    #[must_use]
    pub const fn resolving() -> Self {
        Self { resolve: true }
    }

    /// Fails every lookup.
    #[must_use]
    pub const fn unresolvable() -> Self {
        Self { resolve: false }
    }
}

impl CacheManager for FailingCacheManager {
    fn cache(&self, name: &str) -> CacheResult<Option<Arc<dyn NamedCache>>> {
        if self.resolve {
            Ok(Some(Arc::new(FailingNamedCache::new(name))))
        } else {
            Err(CacheError::backend("cache manager unavailable"))
        }
    }
}
