//! The cache port: a backend-agnostic, fail-open cache contract.

use crate::{metrics, CacheEntry, CacheKey, CacheNamespace, Cacheable};
use async_trait::async_trait;
use tracing::{debug, warn};

/// Cache port implemented by every backend adapter.
///
/// None of these methods can fail. A backend error is logged at warning
/// level with namespace/key context and reported as a miss (`None`) or
/// silently dropped (writes, evictions, clears). Callers treat writes as
/// best-effort and must be correct with an always-empty cache.
///
/// The trait works on untyped [`CacheEntry`] values to stay dyn-compatible;
/// [`CachePortExt`] adds typed reads and writes on top.
#[async_trait]
pub trait CachePort: Send + Sync {
    /// Short backend name used in logs.
    fn backend(&self) -> &'static str;

    /// Reads an entry. `None` on miss or backend failure.
    async fn get_entry(&self, namespace: &CacheNamespace, key: &CacheKey) -> Option<CacheEntry>;

    /// Writes an entry, overwriting any previous value.
    async fn put_entry(&self, namespace: &CacheNamespace, key: &CacheKey, entry: CacheEntry);

    /// Removes one entry. Removing an absent entry is not an error.
    async fn evict(&self, namespace: &CacheNamespace, key: &CacheKey);

    /// Removes every entry of a namespace.
    async fn clear(&self, namespace: &CacheNamespace);
}

/// Typed operations over any [`CachePort`].
///
/// Reads check the stored runtime type tag against the requested type; a
/// mismatch or an undecodable payload is logged and treated as a miss.
#[async_trait]
pub trait CachePortExt: CachePort {
    /// Reads a single typed value.
    async fn get<T: Cacheable>(&self, namespace: &CacheNamespace, key: &CacheKey) -> Option<T> {
        let Some(entry) = self.get_entry(namespace, key).await else {
            metrics::record_miss(namespace);
            return None;
        };

        match entry.into_item::<T>() {
            Ok(value) => {
                metrics::record_hit(namespace);
                Some(value)
            }
            Err(e) => {
                warn!(
                    backend = self.backend(),
                    namespace = %namespace,
                    key = %key,
                    expected = T::TYPE_NAME,
                    error = %e,
                    "Discarding cached value of unexpected type"
                );
                metrics::record_miss(namespace);
                None
            }
        }
    }

    /// Reads a typed list. A stored value that is not a list of `T` is a miss.
    async fn get_list<T: Cacheable>(
        &self,
        namespace: &CacheNamespace,
        key: &CacheKey,
    ) -> Option<Vec<T>> {
        let Some(entry) = self.get_entry(namespace, key).await else {
            metrics::record_miss(namespace);
            return None;
        };

        match entry.into_list::<T>() {
            Ok(values) => {
                metrics::record_hit(namespace);
                Some(values)
            }
            Err(e) => {
                warn!(
                    backend = self.backend(),
                    namespace = %namespace,
                    key = %key,
                    expected = T::TYPE_NAME,
                    error = %e,
                    "Discarding cached value that is not the expected list"
                );
                metrics::record_miss(namespace);
                None
            }
        }
    }

    /// Writes a single typed value. Null values are never stored.
    async fn put<T: Cacheable>(&self, namespace: &CacheNamespace, key: &CacheKey, value: &T) {
        match CacheEntry::item(value) {
            Ok(entry) => self.put_entry(namespace, key, entry).await,
            Err(e) => {
                debug!(
                    backend = self.backend(),
                    namespace = %namespace,
                    key = %key,
                    error = %e,
                    "Skipping cache write"
                );
            }
        }
    }

    /// Writes a typed list.
    async fn put_list<T: Cacheable>(&self, namespace: &CacheNamespace, key: &CacheKey, values: &[T]) {
        match CacheEntry::list(values) {
            Ok(entry) => self.put_entry(namespace, key, entry).await,
            Err(e) => {
                warn!(
                    backend = self.backend(),
                    namespace = %namespace,
                    key = %key,
                    error = %e,
                    "Failed to encode list for cache"
                );
                metrics::record_error(namespace);
            }
        }
    }
}

impl<P: CachePort + ?Sized> CachePortExt for P {}
