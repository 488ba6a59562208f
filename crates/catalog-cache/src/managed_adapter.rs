//! Cache port adapter delegating to named caches of a cache manager.

use crate::{metrics, CacheEntry, CacheKey, CacheManager, CacheNamespace, CachePort, NamedCache};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

const BACKEND: &str = "managed";

/// Adapter mapping a namespace to the cache of the same name.
///
/// A namespace without a cache behaves as an always-empty cache: reads
/// miss, writes and evictions do nothing.
#[derive(Clone)]
pub struct ManagedCacheAdapter {
    manager: Arc<dyn CacheManager>,
}

impl ManagedCacheAdapter {
    /// Creates an adapter over a cache manager.
    #[must_use]
    pub fn new(manager: Arc<dyn CacheManager>) -> Self {
        Self { manager }
    }

    fn resolve(&self, namespace: &CacheNamespace) -> Option<Arc<dyn NamedCache>> {
        match self.manager.cache(namespace.as_str()) {
            Ok(Some(cache)) => Some(cache),
            Ok(None) => {
                debug!(namespace = %namespace, "No cache registered for namespace");
                None
            }
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    error = %e,
                    "Failed to resolve named cache"
                );
                metrics::record_error(namespace);
                None
            }
        }
    }
}

impl std::fmt::Debug for ManagedCacheAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ManagedCacheAdapter").finish_non_exhaustive()
    }
}

#[async_trait]
impl CachePort for ManagedCacheAdapter {
    fn backend(&self) -> &'static str {
        BACKEND
    }

    async fn get_entry(&self, namespace: &CacheNamespace, key: &CacheKey) -> Option<CacheEntry> {
        let cache = self.resolve(namespace)?;

        match cache.get(&key.to_string()).await {
            Ok(entry) => entry,
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
        let Some(cache) = self.resolve(namespace) else {
            return;
        };

        match cache.put(key.to_string(), entry).await {
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
        let Some(cache) = self.resolve(namespace) else {
            return;
        };

        match cache.evict(&key.to_string()).await {
            Ok(()) => metrics::record_eviction(namespace),
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
        let Some(cache) = self.resolve(namespace) else {
            return;
        };

        match cache.clear().await {
            Ok(()) => {
                debug!(cache = cache.name(), "Cleared named cache");
                metrics::record_eviction(namespace);
            }
            Err(e) => {
                warn!(
                    backend = BACKEND,
                    namespace = %namespace,
                    error = %e,
                    "Failed to clear named cache"
                );
                metrics::record_error(namespace);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FailingCacheManager;
    use crate::{CachePortExt, Cacheable, MokaCacheManager};
    use serde::{Deserialize, Serialize};
    use std::time::Duration;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag(String);

    impl Cacheable for Tag {
        const TYPE_NAME: &'static str = "Tag";
    }

    fn ns(name: &str) -> CacheNamespace {
        CacheNamespace::new(name).unwrap()
    }

    #[tokio::test]
    async fn test_unregistered_namespace_is_always_empty() {
        let manager = MokaCacheManager::empty().with_namespace("tags", Duration::from_secs(60), None);
        let cache = ManagedCacheAdapter::new(Arc::new(manager));
        let key = CacheKey::id(1).unwrap();

        cache.put(&ns("labels"), &key, &Tag("x".into())).await;
        assert_eq!(cache.get::<Tag>(&ns("labels"), &key).await, None);
        cache.evict(&ns("labels"), &key).await;
        cache.clear(&ns("labels")).await;
    }

    #[tokio::test]
    async fn test_keys_map_to_named_cache() {
        let manager =
            Arc::new(MokaCacheManager::empty().with_namespace("tags", Duration::from_secs(60), None));
        let cache = ManagedCacheAdapter::new(manager.clone());

        cache.put(&ns("tags"), &CacheKey::id(5).unwrap(), &Tag("five".into())).await;

        let named = manager.cache("tags").unwrap().unwrap();
        assert!(named.get("5").await.unwrap().is_some());
        assert!(named.get("all").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_failing_manager_fails_open() {
        let cache = ManagedCacheAdapter::new(Arc::new(FailingCacheManager::resolving()));
        let key = CacheKey::id(1).unwrap();

        cache.put(&ns("tags"), &key, &Tag("x".into())).await;
        assert_eq!(cache.get::<Tag>(&ns("tags"), &key).await, None);
        cache.evict(&ns("tags"), &key).await;
        cache.clear(&ns("tags")).await;

        let broken = ManagedCacheAdapter::new(Arc::new(FailingCacheManager::unresolvable()));
        assert_eq!(broken.get::<Tag>(&ns("tags"), &key).await, None);
    }
}
