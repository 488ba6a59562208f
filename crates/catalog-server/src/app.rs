//! Application wiring.

use catalog_cache::{
    create_pool, CachePort, KeyScheme, ManagedCacheAdapter, MokaCacheManager, RedisStore,
    StoreCacheAdapter, TtlPolicy,
};
use catalog_config::{AppConfig, CacheBackend};
use catalog_core::{CatalogResult, Category, CategoryId, Person, PersonId, Product};
use catalog_repository::InMemoryRepository;
use catalog_service::{CatalogRepositories, CatalogServices};
use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// Wired application.
pub struct App {
    pub port: Arc<dyn CachePort>,
    pub services: CatalogServices,
}

impl App {
    /// Builds the cache backend and services over seeded in-memory stores.
    pub async fn build(config: &AppConfig) -> CatalogResult<Self> {
        let port = build_cache_port(config).await?;
        let repositories = seed_repositories(config.repository.query_delay());
        let services = CatalogServices::new(Arc::clone(&port), &config.cache, repositories)?;
        Ok(Self { port, services })
    }
}

/// Builds the cache port selected by `cache.backend`.
///
/// The Redis backend falls back to in-process caches when `redis.enabled`
/// is false.
pub async fn build_cache_port(config: &AppConfig) -> CatalogResult<Arc<dyn CachePort>> {
    match config.cache.backend {
        CacheBackend::Redis if config.redis.enabled => {
            let pool = create_pool(&config.redis).await?;
            info!(url = %config.redis.url, prefix = %config.redis.key_prefix, "Using Redis cache backend");
            Ok(Arc::new(StoreCacheAdapter::new(
                Arc::new(RedisStore::new(pool)),
                KeyScheme::new(config.redis.key_prefix.clone()),
                TtlPolicy::from_config(&config.cache),
            )))
        }
        CacheBackend::Redis => {
            warn!("Redis is disabled, falling back to in-process caches");
            Ok(memory_port(config))
        }
        CacheBackend::Memory => {
            info!("Using in-process cache backend");
            Ok(memory_port(config))
        }
    }
}

fn memory_port(config: &AppConfig) -> Arc<dyn CachePort> {
    let manager = MokaCacheManager::from_config(&config.cache);
    Arc::new(ManagedCacheAdapter::new(Arc::new(manager)))
}

/// In-memory stores holding a small sample catalog. Every read waits
/// `query_delay` first.
#[must_use]
pub fn seed_repositories(query_delay: Duration) -> CatalogRepositories {
    let categories: Vec<Category> = [("Books", "Printed and digital books"), ("Electronics", "Gadgets")]
        .into_iter()
        .zip(1..)
        .map(|((name, description), id)| Category {
            id: Some(CategoryId::new(id)),
            name: name.to_string(),
            description: Some(description.to_string()),
        })
        .collect();

    let products = vec![
        Product::new("The Rust Programming Language", None, 39.9).with_category(categories[0].clone()),
        Product::new("Mechanical keyboard", Some("Tenkeyless".to_string()), 89.0)
            .with_category(categories[1].clone()),
        Product::new("USB-C cable", None, 9.5).with_category(categories[1].clone()),
    ];

    let persons = [
        ("Ada Lovelace", NaiveDate::from_ymd_opt(1815, 12, 10)),
        ("Alan Turing", NaiveDate::from_ymd_opt(1912, 6, 23)),
        ("Grace Hopper", NaiveDate::from_ymd_opt(1906, 12, 9)),
    ]
    .into_iter()
    .zip(1..)
    .map(|((name, birth_date), id)| {
        let mut person = Person::new(name, birth_date);
        person.id = Some(PersonId::new(id));
        person
    });

    CatalogRepositories {
        categories: Arc::new(InMemoryRepository::with_entities(categories).with_query_delay(query_delay)),
        products: Arc::new(InMemoryRepository::with_entities(products).with_query_delay(query_delay)),
        persons: Arc::new(InMemoryRepository::with_entities(persons).with_query_delay(query_delay)),
    }
}
