//! Cache-aside reads and write-through / invalidate mutations.
//!
//! Reads check the entity cache, call the loader at most once on a miss and
//! populate the cache with the result. Loader errors propagate untouched and
//! leave the cache as it was. There is no single-flight: concurrent misses
//! each call the loader and overwrite the same entry.
//!
//! Mutations run after the store has committed. The aggregate entry is
//! always evicted; what happens to the identifier entry depends on the
//! [`WriteMode`] of the mutation.

use catalog_cache::{metrics, CacheableEntity, EntityCache};
use catalog_config::{NamespaceConfig, WriteMode};
use catalog_core::CatalogResult;
use std::future::Future;
use tracing::debug;

/// Kind of store mutation being reflected in the cache.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
}

/// Cache effect of creates and updates for one namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationPolicy {
    pub on_create: WriteMode,
    pub on_update: WriteMode,
}

impl MutationPolicy {
    /// Write-through on both creates and updates.
    pub const WRITE_THROUGH: Self = Self {
        on_create: WriteMode::WriteThrough,
        on_update: WriteMode::WriteThrough,
    };

    /// Invalidate on both creates and updates.
    pub const INVALIDATE: Self = Self {
        on_create: WriteMode::Invalidate,
        on_update: WriteMode::Invalidate,
    };

    /// Creates a policy.
    #[must_use]
    pub const fn new(on_create: WriteMode, on_update: WriteMode) -> Self {
        Self { on_create, on_update }
    }

    /// Write mode of a mutation.
    #[must_use]
    pub const fn mode(&self, mutation: Mutation) -> WriteMode {
        match mutation {
            Mutation::Create => self.on_create,
            Mutation::Update => self.on_update,
        }
    }

    /// Reflects a committed create or update in the cache.
    ///
    /// Write-through stores `value` under its id. Invalidate evicts the id
    /// entry of an update; a create has no id entry to evict. The aggregate
    /// entry is evicted last in every case.
    pub async fn apply<T: CacheableEntity>(
        &self,
        cache: &EntityCache<T>,
        mutation: Mutation,
        value: &T,
    ) {
        let mode = self.mode(mutation);
        debug!(namespace = %cache.namespace(), ?mutation, %mode, "Applying mutation to cache");

        match (mode, mutation) {
            (WriteMode::WriteThrough, _) => cache.put(value).await,
            (WriteMode::Invalidate, Mutation::Update) => {
                if let Some(id) = value.cache_id() {
                    cache.evict_by_id(id).await;
                }
            }
            (WriteMode::Invalidate, Mutation::Create) => {}
        }
        cache.evict_all().await;
    }
}

impl Default for MutationPolicy {
    fn default() -> Self {
        Self::WRITE_THROUGH
    }
}

impl From<&NamespaceConfig> for MutationPolicy {
    fn from(config: &NamespaceConfig) -> Self {
        Self::new(config.on_create, config.on_update)
    }
}

/// Returns the cached collection, or loads, caches and returns it.
pub async fn get_or_load_all<T, F, Fut>(cache: &EntityCache<T>, loader: F) -> CatalogResult<Vec<T>>
where
    T: CacheableEntity,
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = CatalogResult<Vec<T>>> + Send,
{
    if let Some(values) = cache.get_all().await {
        return Ok(values);
    }

    debug!(namespace = %cache.namespace(), "Cache miss, loading collection");
    metrics::record_loader_invocation(cache.namespace());
    let values = loader().await?;

    cache.put_all(&values).await;
    Ok(values)
}

/// Returns the cached entity, or loads, caches and returns it.
///
/// The loader signals absence as an error; nothing is cached then.
pub async fn get_or_load<T, F, Fut>(cache: &EntityCache<T>, id: T::Id, loader: F) -> CatalogResult<T>
where
    T: CacheableEntity,
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = CatalogResult<T>> + Send,
{
    if let Some(value) = cache.get_by_id(id).await {
        return Ok(value);
    }

    debug!(namespace = %cache.namespace(), %id, "Cache miss, loading entity");
    metrics::record_loader_invocation(cache.namespace());
    let value = loader().await?;

    cache.put(&value).await;
    Ok(value)
}

/// Reflects a committed delete: evicts the id entry, then the aggregate entry.
pub async fn evict_deleted<T: CacheableEntity>(cache: &EntityCache<T>, id: T::Id) {
    cache.evict_by_id(id).await;
    cache.evict_all().await;
}
