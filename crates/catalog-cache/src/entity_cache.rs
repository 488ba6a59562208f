//! Typed per-entity cache facade.

use crate::{CacheKey, CacheNamespace, CachePort, CachePortExt, Cacheable};
use catalog_core::CatalogResult;
use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, warn};

/// A value cached under its own identifier.
pub trait CacheableEntity: Cacheable {
    /// Identifier type; its display form is the entry key.
    type Id: fmt::Display + Copy + Send + Sync;

    /// Default namespace of this entity.
    const NAMESPACE: &'static str;

    /// Identifier, if assigned.
    fn cache_id(&self) -> Option<Self::Id>;
}

/// Cache of one entity type: an aggregate entry holding the full
/// collection plus one entry per identifier, all in a single namespace.
///
/// The aggregate and identifier entries are independent. Writing one never
/// updates or removes the other.
pub struct EntityCache<T> {
    port: Arc<dyn CachePort>,
    namespace: CacheNamespace,
    _entity: PhantomData<fn() -> T>,
}

impl<T> Clone for EntityCache<T> {
    fn clone(&self) -> Self {
        Self {
            port: Arc::clone(&self.port),
            namespace: self.namespace.clone(),
            _entity: PhantomData,
        }
    }
}

impl<T> fmt::Debug for EntityCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCache")
            .field("backend", &self.port.backend())
            .field("namespace", &self.namespace)
            .finish()
    }
}

impl<T: CacheableEntity> EntityCache<T> {
    /// Creates a cache in the entity's default namespace.
    pub fn new(port: Arc<dyn CachePort>) -> CatalogResult<Self> {
        let namespace = CacheNamespace::new(T::NAMESPACE)?;
        Ok(Self::with_namespace(port, namespace))
    }

    /// Creates a cache in a custom namespace.
    #[must_use]
    pub fn with_namespace(port: Arc<dyn CachePort>, namespace: CacheNamespace) -> Self {
        Self {
            port,
            namespace,
            _entity: PhantomData,
        }
    }

    /// Namespace of this cache.
    #[must_use]
    pub fn namespace(&self) -> &CacheNamespace {
        &self.namespace
    }

    /// Cached full collection, if present.
    pub async fn get_all(&self) -> Option<Vec<T>> {
        let values = self.port.get_list::<T>(&self.namespace, &CacheKey::All).await;
        debug!(namespace = %self.namespace, hit = values.is_some(), "get_all");
        values
    }

    /// Replaces the cached full collection.
    pub async fn put_all(&self, values: &[T]) {
        debug!(namespace = %self.namespace, count = values.len(), "put_all");
        self.port.put_list(&self.namespace, &CacheKey::All, values).await;
    }

    /// Drops the cached full collection. Identifier entries are untouched.
    pub async fn evict_all(&self) {
        debug!(namespace = %self.namespace, "evict_all");
        self.port.evict(&self.namespace, &CacheKey::All).await;
    }

    fn entry_key(&self, id: T::Id) -> Option<CacheKey> {
        match CacheKey::id(id) {
            Ok(key) => Some(key),
            Err(e) => {
                warn!(namespace = %self.namespace, %id, error = %e, "Identifier cannot be cached");
                None
            }
        }
    }

    /// Cached entity, if present.
    pub async fn get_by_id(&self, id: T::Id) -> Option<T> {
        let key = self.entry_key(id)?;
        let value = self.port.get::<T>(&self.namespace, &key).await;
        debug!(namespace = %self.namespace, %id, hit = value.is_some(), "get_by_id");
        value
    }

    /// Caches an entity under its identifier. An entity without one is not cached.
    pub async fn put(&self, value: &T) {
        let Some(id) = value.cache_id() else {
            debug!(namespace = %self.namespace, "put skipped: entity has no id");
            return;
        };
        let Some(key) = self.entry_key(id) else {
            return;
        };
        debug!(namespace = %self.namespace, %id, "put");
        self.port.put(&self.namespace, &key, value).await;
    }

    /// Drops one identifier entry. The full collection entry is untouched.
    pub async fn evict_by_id(&self, id: T::Id) {
        let Some(key) = self.entry_key(id) else {
            return;
        };
        debug!(namespace = %self.namespace, %id, "evict_by_id");
        self.port.evict(&self.namespace, &key).await;
    }

    /// Drops every entry of this namespace.
    pub async fn clear_all_entries(&self) {
        debug!(namespace = %self.namespace, "clear_all_entries");
        self.port.clear(&self.namespace).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryStore;
    use crate::{KeyScheme, StoreCacheAdapter, TtlPolicy};
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Book {
        id: Option<i64>,
        title: String,
    }

    impl Cacheable for Book {
        const TYPE_NAME: &'static str = "Book";
    }

    impl CacheableEntity for Book {
        type Id = i64;
        const NAMESPACE: &'static str = "books";

        fn cache_id(&self) -> Option<i64> {
            self.id
        }
    }

    fn book(id: Option<i64>, title: &str) -> Book {
        Book { id, title: title.to_string() }
    }

    fn setup() -> (Arc<MemoryStore>, EntityCache<Book>) {
        let store = Arc::new(MemoryStore::new());
        let port = StoreCacheAdapter::new(store.clone(), KeyScheme::default(), TtlPolicy::default());
        (store, EntityCache::new(Arc::new(port)).unwrap())
    }

    #[tokio::test]
    async fn test_put_without_id_is_noop() {
        let (store, cache) = setup();
        cache.put(&book(None, "draft")).await;
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_put_and_get_by_id() {
        let (store, cache) = setup();
        cache.put(&book(Some(3), "Dune")).await;

        assert_eq!(cache.get_by_id(3).await, Some(book(Some(3), "Dune")));
        assert!(store.contains_key("manual-cache::books::3"));
    }

    #[tokio::test]
    async fn test_all_and_id_entries_are_independent() {
        let (_, cache) = setup();
        let books = vec![book(Some(1), "A"), book(Some(2), "B")];

        cache.put_all(&books).await;
        assert_eq!(cache.get_by_id(1).await, None);

        cache.put(&book(Some(1), "A2")).await;
        assert_eq!(cache.get_all().await, Some(books));

        cache.evict_all().await;
        assert_eq!(cache.get_by_id(1).await, Some(book(Some(1), "A2")));
        assert_eq!(cache.get_all().await, None);

        cache.put_all(&[book(Some(1), "A")]).await;
        cache.evict_by_id(1).await;
        assert!(cache.get_all().await.is_some());
    }

    #[tokio::test]
    async fn test_empty_collection_is_a_hit() {
        let (_, cache) = setup();
        cache.put_all(&[]).await;
        assert_eq!(cache.get_all().await, Some(Vec::new()));
    }

    #[tokio::test]
    async fn test_clear_all_entries() {
        let (store, cache) = setup();
        cache.put_all(&[book(Some(1), "A")]).await;
        cache.put(&book(Some(1), "A")).await;

        cache.clear_all_entries().await;

        assert_eq!(store.len(), 0);
        assert_eq!(cache.get_all().await, None);
        assert_eq!(cache.get_by_id(1).await, None);
    }

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Tag {
        slug: Option<String>,
    }

    impl Cacheable for Tag {
        const TYPE_NAME: &'static str = "Tag";
    }

    impl CacheableEntity for Tag {
        type Id = &'static str;
        const NAMESPACE: &'static str = "tags";

        fn cache_id(&self) -> Option<&'static str> {
            match self.slug.as_deref() {
                Some("all") => Some("all"),
                Some("rust") => Some("rust"),
                _ => None,
            }
        }
    }

    #[tokio::test]
    async fn test_reserved_id_never_touches_collection() {
        let store = Arc::new(MemoryStore::new());
        let port = StoreCacheAdapter::new(store.clone(), KeyScheme::default(), TtlPolicy::default());
        let cache = EntityCache::<Tag>::new(Arc::new(port)).unwrap();
        let tags = vec![Tag { slug: Some("rust".to_string()) }];
        cache.put_all(&tags).await;

        cache.put(&Tag { slug: Some("all".to_string()) }).await;
        cache.evict_by_id("all").await;

        assert_eq!(cache.get_by_id("all").await, None);
        assert_eq!(cache.get_all().await, Some(tags));
        assert_eq!(store.keys(), vec!["manual-cache::tags::all".to_string()]);
    }
}
