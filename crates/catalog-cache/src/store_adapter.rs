//! Cache port adapter writing explicit namespaced keys into a key-value store.

use crate::{
    metrics, CacheEntry, CacheKey, CacheNamespace, CachePort, CacheResult, KeyScheme,
    KeyValueStore, TtlPolicy,
};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const BACKEND: &str = "store";

/// Store-backed cache adapter.
///
/// Entries live under `prefix::namespace::key` and are written with the TTL
/// of their namespace. Clearing a namespace scans `prefix::namespace::*` and
/// deletes the matches.
#[derive(Clone)]
pub struct StoreCacheAdapter {
    store: Arc<dyn KeyValueStore>,
    scheme: KeyScheme,
    ttl: TtlPolicy,
}

impl StoreCacheAdapter {
    /// Creates an adapter over a key-value store.
    #[must_use]
    pub fn new(store: Arc<dyn KeyValueStore>, scheme: KeyScheme, ttl: TtlPolicy) -> Self {
        Self { store, scheme, ttl }
    }

    /// Returns the key scheme.
    #[must_use]
    pub fn scheme(&self) -> &KeyScheme {
        &self.scheme
    }

    async fn try_get(&self, physical_key: &str) -> CacheResult<Option<CacheEntry>> {
        match self.store.get(physical_key).await? {
            Some(raw) => Ok(Some(CacheEntry::from_json(&raw)?)),
            None => Ok(None),
        }
    }

    async fn try_put(
        &self,
        namespace: &CacheNamespace,
        physical_key: &str,
        entry: &CacheEntry,
    ) -> CacheResult<()> {
        let raw = entry.to_json()?;
        self.store
            .set_ex(physical_key, &raw, self.ttl.ttl_for(namespace))
            .await
    }

    async fn try_clear(&self, pattern: &str) -> CacheResult<u64> {
        let keys = self.store.scan_keys(pattern).await?;
        if keys.is_empty() {
            return Ok(0);
        }
        self.store.delete(&keys).await
    }
}

impl std::fmt::Debug for StoreCacheAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreCacheAdapter")
            .field("scheme", &self.scheme)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl CachePort for StoreCacheAdapter {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_entry(&self, namespace: &CacheNamespace, key: &CacheKey) -> Option<CacheEntry> {
        let physical_key = self.scheme.physical_key(namespace, key);

        match self.try_get(&physical_key).await {
            Ok(Some(entry)) => {
                debug!(key = %physical_key, "Cache hit");
                Some(entry)
            }
            Ok(None) => {
                debug!(key = %physical_key, "Cache miss");
                None
            }
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    key = %key,
                    error = %e,
                    "Failed to read cache entry"
                );
                metrics::record_error(namespace);
                None
            }
        }
    }

    async fn put_entry(&self, namespace: &CacheNamespace, key: &CacheKey, entry: CacheEntry) {
        let physical_key = self.scheme.physical_key(namespace, key);

        match self.try_put(namespace, &physical_key, &entry).await {
            Ok(()) => metrics::record_write(namespace),
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    key = %key,
                    error = %e,
                    "Failed to write cache entry"
                );
                metrics::record_error(namespace);
            }
        }
    }

    async fn evict(&self, namespace: &CacheNamespace, key: &CacheKey) {
        let physical_key = self.scheme.physical_key(namespace, key);

        match self.store.delete(std::slice::from_ref(&physical_key)).await {
            Ok(deleted) => {
                debug!(key = %physical_key, existed = deleted > 0, "Evicted cache entry");
                metrics::record_eviction(namespace);
            }
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    key = %key,
                    error = %e,
                    "Failed to evict cache entry"
                );
                metrics::record_error(namespace);
            }
        }
    }

    async fn clear(&self, namespace: &CacheNamespace) {
        let pattern = self.scheme.namespace_pattern(namespace);

        match self.try_clear(&pattern).await {
            Ok(deleted) => {
                debug!(pattern = %pattern, deleted, "Cleared cache namespace");
                metrics::record_eviction(namespace);
            }
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    error = %e,
                    "Failed to clear cache namespace"
                );
                metrics::record_error(namespace);
            }
        }
    }
}
