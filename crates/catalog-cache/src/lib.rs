//! # Catalog Cache
//!
//! Backend-agnostic cache port for the catalog, with two adapters:
//!
//! - [`StoreCacheAdapter`] writes explicit `prefix::namespace::key` entries
//!   into a [`KeyValueStore`] (Redis in production).
//! - [`ManagedCacheAdapter`] delegates to named caches handed out by a
//!   [`CacheManager`] (in-process Moka caches).
//!
//! Every port operation is fail-open: backend errors, undecodable values and
//! type mismatches are logged and turned into a miss or a no-op. Nothing
//! raised inside an adapter reaches the caller.
//!
//! [`EntityCache`] is the typed per-entity facade used by services.

mod entity_cache;
mod entry;
mod error;
mod key;
mod managed_adapter;
mod manager;
pub mod metrics;
mod port;
mod redis_store;
mod store;
mod store_adapter;
pub mod testing;
mod ttl;

pub use entity_cache::{CacheableEntity, EntityCache};
pub use entry::{CacheEntry, Cacheable, EntryKind};
pub use error::{CacheError, CacheResult};
pub use key::{CacheKey, CacheNamespace, EntryId, KeyScheme, ALL_KEY, DEFAULT_KEY_PREFIX};
pub use managed_adapter::ManagedCacheAdapter;
pub use manager::{CacheManager, MokaCacheManager, MokaNamedCache, NamedCache};
pub use port::{CachePort, CachePortExt};
pub use redis_store::{create_pool, RedisStore};
pub use store::KeyValueStore;
pub use store_adapter::StoreCacheAdapter;
pub use ttl::TtlPolicy;
