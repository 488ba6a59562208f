//! Key-value store client seam used by the store-backed adapter.

use crate::CacheResult;
use async_trait::async_trait;
use std::time::Duration;

/// A string-valued key-value store with TTL writes and pattern scans.
///
/// Implementations must be safe to share between concurrent callers; the
/// Redis implementation is backed by a connection pool.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads a value.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Writes a value that expires after `ttl`.
    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Deletes keys, returning how many existed.
    async fn delete(&self, keys: &[String]) -> CacheResult<u64>;

    /// Lists keys matching a glob pattern.
    async fn scan_keys(&self, pattern: &str) -> CacheResult<Vec<String>>;
}
