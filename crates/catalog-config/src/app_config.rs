//! Application configuration structures.

use catalog_core::telemetry::LoggingConfig;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// Redis connection configuration.
    #[serde(default)]
    pub redis: RedisConfig,

    /// Cache namespaces, TTLs and backend selection.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Authoritative store settings.
    #[serde(default)]
    pub repository: RepositoryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Short description.
    pub description: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "catalog-cache".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Cache-aside catalog".to_string(),
            environment: "development".to_string(),
        }
    }
}

/// Authoritative store settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RepositoryConfig {
    /// Artificial latency of every store query, in milliseconds. Makes the
    /// cost of a cache miss visible in the walk-through.
    pub query_delay_ms: u64,
}

impl RepositoryConfig {
    /// Returns the query latency as a Duration.
    #[must_use]
    pub const fn query_delay(&self) -> Duration {
        Duration::from_millis(self.query_delay_ms)
    }
}

/// Redis configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RedisConfig {
    /// Redis URL.
    pub url: String,
    /// Connection pool size.
    pub pool_size: usize,
    /// Enable Redis (can be disabled for local development).
    pub enabled: bool,
    /// Pool wait/create timeout in seconds.
    pub timeout_secs: u64,
    /// Prefix of every physical key written by the store-backed adapter.
    pub key_prefix: String,
}

impl Default for RedisConfig {
    fn default() -> Self {
        Self {
            url: "redis://localhost:6379".to_string(),
            pool_size: 10,
            enabled: true,
            timeout_secs: 5,
            key_prefix: "manual-cache".to_string(),
        }
    }
}

impl RedisConfig {
    /// Returns the pool timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Which cache port adapter backs the entity caches.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheBackend {
    /// Store-backed adapter over Redis with explicit namespaced keys.
    #[default]
    Redis,
    /// Named-cache adapter over in-process Moka caches.
    Memory,
}

impl fmt::Display for CacheBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Redis => write!(f, "redis"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// What a mutation does to the individual-item cache entry.
///
/// Either way the aggregate entry of the namespace is evicted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Store the freshly persisted value under its id.
    WriteThrough,
    /// Evict the id entry and let the next read repopulate it.
    Invalidate,
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WriteThrough => write!(f, "write_through"),
            Self::Invalidate => write!(f, "invalidate"),
        }
    }
}

/// Per-namespace cache settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamespaceConfig {
    /// Namespace name, also the cache name.
    pub name: String,
    /// Entry time-to-live in seconds.
    pub ttl_secs: u64,
    /// Cache effect of a create.
    #[serde(default = "default_write_mode")]
    pub on_create: WriteMode,
    /// Cache effect of an update.
    #[serde(default = "default_write_mode")]
    pub on_update: WriteMode,
    /// Upper bound on in-process entries (memory backend only).
    #[serde(default)]
    pub max_capacity: Option<u64>,
}

fn default_write_mode() -> WriteMode {
    WriteMode::WriteThrough
}

impl NamespaceConfig {
    /// Creates a namespace with the given TTL and write-through on every mutation.
    #[must_use]
    pub fn new(name: impl Into<String>, ttl: Duration) -> Self {
        Self {
            name: name.into(),
            ttl_secs: ttl.as_secs(),
            on_create: WriteMode::WriteThrough,
            on_update: WriteMode::WriteThrough,
            max_capacity: None,
        }
    }

    /// Sets the mutation policies.
    #[must_use]
    pub const fn with_modes(mut self, on_create: WriteMode, on_update: WriteMode) -> Self {
        self.on_create = on_create;
        self.on_update = on_update;
        self
    }

    /// Returns the TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Cache configuration.
///
/// The `default` entry supplies the TTL of any namespace without its own entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Backend used by the entity caches.
    #[serde(default)]
    pub backend: CacheBackend,
    /// Fallback settings.
    #[serde(default = "default_namespace")]
    pub default: NamespaceConfig,
    /// Category cache.
    #[serde(default = "categories_namespace")]
    pub categories: NamespaceConfig,
    /// Product cache.
    #[serde(default = "products_namespace")]
    pub products: NamespaceConfig,
    /// Person cache.
    #[serde(default = "persons_namespace")]
    pub persons: NamespaceConfig,
}

fn default_namespace() -> NamespaceConfig {
    NamespaceConfig::new("default", Duration::from_secs(60 * 60))
}

fn categories_namespace() -> NamespaceConfig {
    NamespaceConfig::new("categories", Duration::from_secs(24 * 60 * 60))
}

fn products_namespace() -> NamespaceConfig {
    NamespaceConfig::new("products", Duration::from_secs(16 * 60 * 60))
        .with_modes(WriteMode::Invalidate, WriteMode::Invalidate)
}

fn persons_namespace() -> NamespaceConfig {
    NamespaceConfig::new("persons", Duration::from_secs(10 * 60))
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::default(),
            default: default_namespace(),
            categories: categories_namespace(),
            products: products_namespace(),
            persons: persons_namespace(),
        }
    }
}

impl CacheConfig {
    /// Returns the entity namespaces (excluding the fallback entry).
    #[must_use]
    pub fn namespaces(&self) -> [&NamespaceConfig; 3] {
        [&self.categories, &self.products, &self.persons]
    }

    /// Looks up an entity namespace by name.
    #[must_use]
    pub fn namespace(&self, name: &str) -> Option<&NamespaceConfig> {
        self.namespaces().into_iter().find(|ns| ns.name == name)
    }

    /// Returns the fallback TTL.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default.ttl()
    }

    /// Returns the TTL for a namespace, falling back to the default.
    #[must_use]
    pub fn ttl_for(&self, name: &str) -> Duration {
        self.namespace(name).map_or_else(|| self.default_ttl(), NamespaceConfig::ttl)
    }
}
