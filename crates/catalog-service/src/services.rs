//! The three catalog services and their wiring.

use crate::cache_aside::MutationPolicy;
use crate::mappers::{CategoryMapper, PersonMapper, ProductMapper};
use crate::r#impl::CachedEntityService;
use catalog_cache::{CacheNamespace, CachePort, CacheableEntity, EntityCache};
use catalog_config::{CacheConfig, NamespaceConfig};
use catalog_core::{CatalogResult, Category, Person, Product};
use catalog_repository::{CrudRepository, InMemoryRepository};
use std::sync::Arc;
use tracing::info;

/// Category service.
pub type CategoryService = CachedEntityService<CategoryMapper>;

/// Product service.
pub type ProductService = CachedEntityService<ProductMapper>;

/// Person service.
pub type PersonService = CachedEntityService<PersonMapper>;

/// Authoritative stores of the catalog.
#[derive(Clone)]
pub struct CatalogRepositories {
    pub categories: Arc<dyn CrudRepository<Category>>,
    pub products: Arc<dyn CrudRepository<Product>>,
    pub persons: Arc<dyn CrudRepository<Person>>,
}

impl CatalogRepositories {
    /// Empty in-memory stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            categories: Arc::new(InMemoryRepository::<Category>::new()),
            products: Arc::new(InMemoryRepository::<Product>::new()),
            persons: Arc::new(InMemoryRepository::<Person>::new()),
        }
    }
}

/// All catalog services sharing one cache port.
pub struct CatalogServices {
    pub categories: CategoryService,
    pub products: ProductService,
    pub persons: PersonService,
}

impl CatalogServices {
    /// Wires the services.
    ///
    /// Each service caches in the namespace named by its configuration entry
    /// and follows that entry's create/update policy.
    pub fn new(
        port: Arc<dyn CachePort>,
        config: &CacheConfig,
        repositories: CatalogRepositories,
    ) -> CatalogResult<Self> {
        let categories = CachedEntityService::new(
            Arc::clone(&repositories.categories),
            CategoryMapper,
            entity_cache(&port, &config.categories)?,
            MutationPolicy::from(&config.categories),
        );

        let products = CachedEntityService::new(
            repositories.products,
            ProductMapper::new(repositories.categories),
            entity_cache(&port, &config.products)?,
            MutationPolicy::from(&config.products),
        );

        let persons = CachedEntityService::new(
            repositories.persons,
            PersonMapper,
            entity_cache(&port, &config.persons)?,
            MutationPolicy::from(&config.persons),
        );

        info!(
            backend = port.backend(),
            categories = ?categories.policy(),
            products = ?products.policy(),
            persons = ?persons.policy(),
            "Catalog services wired"
        );

        Ok(Self {
            categories,
            products,
            persons,
        })
    }

    /// Clears every cached entry of every service.
    pub async fn clear_caches(&self) {
        self.categories.cache().clear_all_entries().await;
        self.products.cache().clear_all_entries().await;
        self.persons.cache().clear_all_entries().await;
    }
}

fn entity_cache<T: CacheableEntity>(
    port: &Arc<dyn CachePort>,
    config: &NamespaceConfig,
) -> CatalogResult<EntityCache<T>> {
    let namespace = CacheNamespace::new(&config.name)?;
    Ok(EntityCache::with_namespace(Arc::clone(port), namespace))
}
