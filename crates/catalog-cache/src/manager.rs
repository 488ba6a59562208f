//! Named caches and the manager that hands them out.

use crate::{CacheEntry, CacheResult};
use async_trait::async_trait;
use catalog_config::CacheConfig;
use moka::future::Cache;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// A single named cache with its own expiry settings.
#[async_trait]
pub trait NamedCache: Send + Sync {
    /// Cache name.
    fn name(&self) -> &str;

    /// Reads an entry.
    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>>;

    /// Writes an entry.
    async fn put(&self, key: String, entry: CacheEntry) -> CacheResult<()>;

    /// Removes an entry if present.
    async fn evict(&self, key: &str) -> CacheResult<()>;

    /// Removes every entry.
    async fn clear(&self) -> CacheResult<()>;
}

/// Resolves cache names to caches.
pub trait CacheManager: Send + Sync {
    /// Returns the cache registered under `name`, or `None` if there is none.
    fn cache(&self, name: &str) -> CacheResult<Option<Arc<dyn NamedCache>>>;
}

/// Moka-based named cache.
pub struct MokaNamedCache {
    name: String,
    cache: Cache<String, CacheEntry>,
}

impl MokaNamedCache {
    /// Creates a cache whose entries expire `ttl` after being written.
    #[must_use]
    pub fn new(name: impl Into<String>, ttl: Duration, max_capacity: Option<u64>) -> Self {
        let name = name.into();
        let mut builder = Cache::builder().name(&name).time_to_live(ttl);

        if let Some(capacity) = max_capacity {
            builder = builder.max_capacity(capacity);
        }

        Self {
            name,
            cache: builder.build(),
        }
    }

    /// Approximate number of live entries.
    #[must_use]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

impl std::fmt::Debug for MokaNamedCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaNamedCache")
            .field("name", &self.name)
            .field("entries", &self.cache.entry_count())
            .finish()
    }
}

#[async_trait]
impl NamedCache for MokaNamedCache {
    fn name(&self) -> &str {
        &self.name
    }

    async fn get(&self, key: &str) -> CacheResult<Option<CacheEntry>> {
        Ok(self.cache.get(key).await)
    }

    async fn put(&self, key: String, entry: CacheEntry) -> CacheResult<()> {
        self.cache.insert(key, entry).await;
        Ok(())
    }

    async fn evict(&self, key: &str) -> CacheResult<()> {
        self.cache.invalidate(key).await;
        Ok(())
    }

    async fn clear(&self) -> CacheResult<()> {
        self.cache.invalidate_all();
        // Flush pending maintenance so entry_count reflects the clear.
        self.cache.run_pending_tasks().await;
        Ok(())
    }
}

/// Cache manager holding one Moka cache per configured namespace.
#[derive(Default)]
pub struct MokaCacheManager {
    caches: HashMap<String, Arc<MokaNamedCache>>,
}

impl MokaCacheManager {
    /// Creates a manager with no caches.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Creates one cache per entity namespace of the configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        config.namespaces().into_iter().fold(Self::empty(), |manager, ns| {
            manager.with_namespace(ns.name.clone(), ns.ttl(), ns.max_capacity)
        })
    }

    /// Registers a cache.
    #[must_use]
    pub fn with_namespace(
        mut self,
        name: impl Into<String>,
        ttl: Duration,
        max_capacity: Option<u64>,
    ) -> Self {
        let name = name.into();
        debug!(cache = %name, ttl_secs = ttl.as_secs(), ?max_capacity, "Registering named cache");
        let cache = Arc::new(MokaNamedCache::new(name.clone(), ttl, max_capacity));
        self.caches.insert(name, cache);
        self
    }

    /// Names of registered caches, sorted.
    #[must_use]
    pub fn cache_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.caches.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl std::fmt::Debug for MokaCacheManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MokaCacheManager")
            .field("caches", &self.cache_names())
            .finish()
    }
}

impl CacheManager for MokaCacheManager {
    fn cache(&self, name: &str) -> CacheResult<Option<Arc<dyn NamedCache>>> {
        Ok(self
            .caches
            .get(name)
            .map(|cache| Arc::clone(cache) as Arc<dyn NamedCache>))
    }
}
