//! Per-namespace time-to-live selection.

use crate::CacheNamespace;
use catalog_config::CacheConfig;
use std::collections::HashMap;
use std::time::Duration;

/// Maps namespaces to entry TTLs, with a default for unknown namespaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TtlPolicy {
    default: Duration,
    overrides: HashMap<String, Duration>,
}

impl TtlPolicy {
    /// Creates a policy where every namespace uses `default`.
    #[must_use]
    pub fn new(default: Duration) -> Self {
        Self {
            default,
            overrides: HashMap::new(),
        }
    }

    /// Adds a namespace-specific TTL.
    #[must_use]
    pub fn with_override(mut self, namespace: impl Into<String>, ttl: Duration) -> Self {
        self.overrides.insert(namespace.into(), ttl);
        self
    }

    /// Builds the policy from the cache configuration.
    #[must_use]
    pub fn from_config(config: &CacheConfig) -> Self {
        config
            .namespaces()
            .into_iter()
            .fold(Self::new(config.default_ttl()), |policy, ns| {
                policy.with_override(ns.name.clone(), ns.ttl())
            })
    }

    /// Returns the TTL of a namespace.
    #[must_use]
    pub fn ttl_for(&self, namespace: &CacheNamespace) -> Duration {
        self.overrides
            .get(namespace.as_str())
            .copied()
            .unwrap_or(self.default)
    }

    /// Returns the default TTL.
    #[must_use]
    pub const fn default_ttl(&self) -> Duration {
        self.default
    }
}

impl Default for TtlPolicy {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}
