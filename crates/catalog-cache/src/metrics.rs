//! Cache metrics.
//!
//! Counters are labelled by namespace. Without an installed recorder the
//! macros are no-ops.

use crate::CacheNamespace;
use metrics::{counter, describe_counter};

/// Metric names for the cache layer.
pub mod names {
    /// Reads served from the cache.
    pub const CACHE_HITS_TOTAL: &str = "catalog_cache_hits_total";
    /// Reads that found nothing usable.
    pub const CACHE_MISSES_TOTAL: &str = "catalog_cache_misses_total";
    /// Backend failures swallowed by the port.
    pub const CACHE_ERRORS_TOTAL: &str = "catalog_cache_errors_total";
    /// Entries written.
    pub const CACHE_WRITES_TOTAL: &str = "catalog_cache_writes_total";
    /// Entries evicted (single key or whole namespace).
    pub const CACHE_EVICTIONS_TOTAL: &str = "catalog_cache_evictions_total";
    /// Authoritative loader calls made after a miss.
    pub const LOADER_INVOCATIONS_TOTAL: &str = "catalog_loader_invocations_total";
}

/// Register all metric descriptions.
pub fn register_metrics() {
    describe_counter!(names::CACHE_HITS_TOTAL, "Cache reads served from the cache");
    describe_counter!(names::CACHE_MISSES_TOTAL, "Cache reads that fell through to the loader");
    describe_counter!(names::CACHE_ERRORS_TOTAL, "Cache backend failures recovered as miss or no-op");
    describe_counter!(names::CACHE_WRITES_TOTAL, "Cache entries written");
    describe_counter!(names::CACHE_EVICTIONS_TOTAL, "Cache evictions and namespace clears");
    describe_counter!(names::LOADER_INVOCATIONS_TOTAL, "Authoritative store loads after a cache miss");
}

fn namespace_label(namespace: &CacheNamespace) -> String {
    namespace.as_str().to_owned()
}

pub(crate) fn record_hit(namespace: &CacheNamespace) {
    counter!(names::CACHE_HITS_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}

pub(crate) fn record_miss(namespace: &CacheNamespace) {
    counter!(names::CACHE_MISSES_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}

pub(crate) fn record_error(namespace: &CacheNamespace) {
    counter!(names::CACHE_ERRORS_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}

pub(crate) fn record_write(namespace: &CacheNamespace) {
    counter!(names::CACHE_WRITES_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}

pub(crate) fn record_eviction(namespace: &CacheNamespace) {
    counter!(names::CACHE_EVICTIONS_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}

/// Records a loader call made by a cache-aside read.
pub fn record_loader_invocation(namespace: &CacheNamespace) {
    counter!(names::LOADER_INVOCATIONS_TOTAL, "namespace" => namespace_label(namespace)).increment(1);
}
