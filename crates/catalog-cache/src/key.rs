//! Namespaces, entry keys and the physical key scheme.

use catalog_config::{contains_pattern_metacharacter, KEY_SEPARATOR};
use catalog_core::{CatalogError, CatalogResult};
use std::fmt;
use std::sync::Arc;

/// Sentinel key of the aggregate ("full collection") entry of a namespace.
pub const ALL_KEY: &str = "all";

/// Default prefix of physical keys written by the store-backed adapter.
pub const DEFAULT_KEY_PREFIX: &str = "manual-cache";

/// A logical group of cache entries sharing a TTL and a clear scope.
///
/// The name never contains [`KEY_SEPARATOR`], which keeps physical keys of
/// different namespaces disjoint, nor a glob metacharacter, so the scan
/// pattern of one namespace never matches keys of another.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheNamespace(Arc<str>);

impl CacheNamespace {
    /// Creates a namespace, rejecting empty names and names containing the
    /// separator or a glob metacharacter (`* ? [ ] \`).
    pub fn new(name: impl AsRef<str>) -> CatalogResult<Self> {
        let name = name.as_ref();
        if name.is_empty() {
            return Err(CatalogError::configuration("Cache namespace name cannot be empty"));
        }
        if name.contains(KEY_SEPARATOR) {
            return Err(CatalogError::configuration(format!(
                "Cache namespace '{}' must not contain '{}'",
                name, KEY_SEPARATOR
            )));
        }
        if contains_pattern_metacharacter(name) {
            return Err(CatalogError::configuration(format!(
                "Cache namespace '{}' must not contain any of * ? [ ] \\",
                name
            )));
        }
        Ok(Self(Arc::from(name)))
    }

    /// Returns the namespace name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CacheNamespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Identifier part of an entity key. Never equal to [`ALL_KEY`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EntryId(String);

impl EntryId {
    /// Returns the identifier as it appears in keys.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Key of an entry within a namespace.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// The aggregate entry holding the whole collection.
    All,
    /// A single entity, keyed by its identifier.
    Id(EntryId),
}

impl CacheKey {
    /// Creates an entity key from any displayable identifier.
    ///
    /// Fails for an identifier displaying as [`ALL_KEY`], which would
    /// address the aggregate entry.
    pub fn id(id: impl fmt::Display) -> CatalogResult<Self> {
        let id = id.to_string();
        if id == ALL_KEY {
            return Err(CatalogError::validation(format!(
                "Entry id '{}' is reserved for the full collection",
                id
            )));
        }
        Ok(Self::Id(EntryId(id)))
    }

    /// Returns true for the aggregate key.
    #[must_use]
    pub const fn is_all(&self) -> bool {
        matches!(self, Self::All)
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str(ALL_KEY),
            Self::Id(id) => f.write_str(id.as_str()),
        }
    }
}

/// Builds physical keys as `prefix::namespace::key`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyScheme {
    prefix: String,
}

impl KeyScheme {
    /// Creates a key scheme with the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self { prefix: prefix.into() }
    }

    /// Returns the prefix.
    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Physical key of one entry.
    #[must_use]
    pub fn physical_key(&self, namespace: &CacheNamespace, key: &CacheKey) -> String {
        format!("{}{sep}{}{sep}{}", self.prefix, namespace, key, sep = KEY_SEPARATOR)
    }

    /// Scan pattern matching every entry of a namespace.
    #[must_use]
    pub fn namespace_pattern(&self, namespace: &CacheNamespace) -> String {
        format!("{}{sep}{}{sep}*", self.prefix, namespace, sep = KEY_SEPARATOR)
    }
}

impl Default for KeyScheme {
    fn default() -> Self {
        Self::new(DEFAULT_KEY_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ns(name: &str) -> CacheNamespace {
        CacheNamespace::new(name).unwrap()
    }

    #[test]
    fn test_physical_key_format() {
        let scheme = KeyScheme::default();
        assert_eq!(
            scheme.physical_key(&ns("products"), &CacheKey::id(42).unwrap()),
            "manual-cache::products::42"
        );
        assert_eq!(
            scheme.physical_key(&ns("products"), &CacheKey::All),
            "manual-cache::products::all"
        );
    }

    #[test]
    fn test_namespace_pattern() {
        let scheme = KeyScheme::new("app");
        assert_eq!(scheme.namespace_pattern(&ns("categories")), "app::categories::*");
    }

    #[test]
    fn test_namespace_rejects_separator() {
        assert!(CacheNamespace::new("a::b").is_err());
        assert!(CacheNamespace::new("").is_err());
        assert_eq!(ns("persons").as_str(), "persons");
    }

    #[test]
    fn test_prefix_namespaces_do_not_collide() {
        // "product" is a textual prefix of "products"; the separator keeps them apart.
        let scheme = KeyScheme::default();
        let pattern = scheme.namespace_pattern(&ns("product"));
        let other = scheme.physical_key(&ns("products"), &CacheKey::id(1).unwrap());
        assert!(!other.starts_with(pattern.trim_end_matches('*')));
    }

    #[test]
    fn test_cache_key_display() {
        assert_eq!(CacheKey::All.to_string(), "all");
        assert_eq!(CacheKey::id("abc").unwrap().to_string(), "abc");
        assert!(CacheKey::All.is_all());
        assert!(!CacheKey::id(1).unwrap().is_all());
    }

    #[test]
    fn test_id_cannot_address_the_collection() {
        assert!(CacheKey::id(ALL_KEY).is_err());
        assert!(CacheKey::id("ALL").is_ok());

        let scheme = KeyScheme::default();
        let products = ns("products");
        assert_ne!(
            scheme.physical_key(&products, &CacheKey::id("all-time").unwrap()),
            scheme.physical_key(&products, &CacheKey::All)
        );
    }

    #[test]
    fn test_namespace_rejects_pattern_metacharacters() {
        for name in ["product?", "prod*", "[pc]ategories", "a]b", "back\\slash"] {
            assert!(CacheNamespace::new(name).is_err(), "{name}");
        }
        assert!(CacheNamespace::new("product-v2_cache.x").is_ok());
    }
}
