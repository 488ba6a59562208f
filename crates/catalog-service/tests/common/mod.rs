//! Shared fixtures for service integration tests.

use async_trait::async_trait;
use catalog_cache::testing::{FailingStore, MemoryStore};
use catalog_cache::{
    CachePort, KeyScheme, ManagedCacheAdapter, MokaCacheManager, StoreCacheAdapter, TtlPolicy,
};
use catalog_config::CacheConfig;
use catalog_core::{CatalogResult, Entity};
use catalog_repository::{CrudRepository, InMemoryRepository};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Repository counting authoritative loads (`find_all` and `find_by_id`).
pub struct CountingRepository<E: Entity> {
    inner: InMemoryRepository<E>,
    loads: AtomicUsize,
}

impl<E: Entity> CountingRepository<E> {
    pub fn new(entities: impl IntoIterator<Item = E>) -> Arc<Self> {
        Arc::new(Self {
            inner: InMemoryRepository::with_entities(entities),
            loads: AtomicUsize::new(0),
        })
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl<E: Entity> CrudRepository<E> for CountingRepository<E> {
    async fn find_all(&self) -> CatalogResult<Vec<E>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_all().await
    }

    async fn find_by_id(&self, id: E::Id) -> CatalogResult<Option<E>> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.find_by_id(id).await
    }

    async fn save(&self, entity: E) -> CatalogResult<E> {
        self.inner.save(entity).await
    }

    async fn delete_by_id(&self, id: E::Id) -> CatalogResult<bool> {
        self.inner.delete_by_id(id).await
    }

    async fn count(&self) -> CatalogResult<u64> {
        self.inner.count().await
    }
}

/// A named cache port.
pub struct Backend {
    pub name: &'static str,
    pub port: Arc<dyn CachePort>,
}

/// Store-backed and Moka-backed ports configured from the default cache config.
pub fn backends() -> Vec<Backend> {
    let config = CacheConfig::default();
    vec![
        Backend {
            name: "store",
            port: Arc::new(StoreCacheAdapter::new(
                Arc::new(MemoryStore::new()),
                KeyScheme::default(),
                TtlPolicy::from_config(&config),
            )),
        },
        Backend {
            name: "managed",
            port: Arc::new(ManagedCacheAdapter::new(Arc::new(
                MokaCacheManager::from_config(&config),
            ))),
        },
    ]
}

/// Store-backed port whose store always fails.
pub fn failing_port() -> Arc<dyn CachePort> {
    Arc::new(StoreCacheAdapter::new(
        Arc::new(FailingStore),
        KeyScheme::default(),
        TtlPolicy::default(),
    ))
}

/// Managed port with no caches registered.
pub fn unconfigured_port() -> Arc<dyn CachePort> {
    Arc::new(ManagedCacheAdapter::new(Arc::new(MokaCacheManager::empty())))
}
