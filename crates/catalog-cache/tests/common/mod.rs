//! Shared fixtures for cache port integration tests.

use catalog_cache::testing::{FailingCacheManager, FailingStore, MemoryStore};
use catalog_cache::{
    CacheNamespace, CachePort, Cacheable, KeyScheme, ManagedCacheAdapter, MokaCacheManager,
    StoreCacheAdapter, TtlPolicy,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
}

impl Cacheable for Product {
    const TYPE_NAME: &'static str = "Product";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
}

impl Cacheable for Category {
    const TYPE_NAME: &'static str = "Category";
}

pub fn product(id: i64, name: &str) -> Product {
    Product { id, name: name.to_string() }
}

pub fn category(id: i64, name: &str) -> Category {
    Category { id, name: name.to_string() }
}

pub fn ns(name: &str) -> CacheNamespace {
    CacheNamespace::new(name).expect("valid namespace")
}

/// A named port under test.
pub struct Backend {
    pub name: &'static str,
    pub port: Arc<dyn CachePort>,
}

fn ttl_policy() -> TtlPolicy {
    TtlPolicy::new(Duration::from_secs(300))
        .with_override("categories", Duration::from_secs(86_400))
        .with_override("products", Duration::from_secs(57_600))
}

pub fn store_backend() -> (Arc<MemoryStore>, Backend) {
    let store = Arc::new(MemoryStore::new());
    let port = StoreCacheAdapter::new(store.clone(), KeyScheme::default(), ttl_policy());
    (
        store,
        Backend {
            name: "store",
            port: Arc::new(port),
        },
    )
}

pub fn managed_backend() -> Backend {
    let manager = ["categories", "products", "persons"]
        .into_iter()
        .fold(MokaCacheManager::empty(), |manager, name| {
            manager.with_namespace(name, Duration::from_secs(300), None)
        });
    Backend {
        name: "managed",
        port: Arc::new(ManagedCacheAdapter::new(Arc::new(manager))),
    }
}

/// Both working backends.
pub fn backends() -> Vec<Backend> {
    vec![store_backend().1, managed_backend()]
}

/// Backends whose every underlying call fails.
pub fn failing_backends() -> Vec<Backend> {
    vec![
        Backend {
            name: "failing store",
            port: Arc::new(StoreCacheAdapter::new(
                Arc::new(FailingStore),
                KeyScheme::default(),
                ttl_policy(),
            )),
        },
        Backend {
            name: "failing named caches",
            port: Arc::new(ManagedCacheAdapter::new(Arc::new(
                FailingCacheManager::resolving(),
            ))),
        },
        Backend {
            name: "failing manager",
            port: Arc::new(ManagedCacheAdapter::new(Arc::new(
                FailingCacheManager::unresolvable(),
            ))),
        },
    ]
}
