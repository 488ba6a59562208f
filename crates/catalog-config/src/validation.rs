//! Configuration validation.
//!
//! Fails fast on configuration that would produce colliding cache keys or
//! entries that expire immediately.

use crate::{AppConfig, CacheBackend, CacheConfig, NamespaceConfig, RedisConfig};
use std::fmt;

/// Separator between prefix, namespace and key in physical cache keys.
pub const KEY_SEPARATOR: &str = "::";

/// Glob metacharacters of store scan patterns. Namespaces and key prefixes
/// are spliced into those patterns unescaped, so they must not contain any.
pub const PATTERN_METACHARACTERS: &[char] = &['*', '?', '[', ']', '\\'];

/// Returns true if `name` contains a scan-pattern metacharacter.
#[must_use]
pub fn contains_pattern_metacharacter(name: &str) -> bool {
    name.contains(PATTERN_METACHARACTERS)
}

/// Configuration validation error variants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigValidationError {
    /// Namespace name is empty.
    EmptyNamespace,
    /// Namespace name contains the key separator.
    NamespaceContainsSeparator { name: String },
    /// Namespace name contains a scan-pattern metacharacter.
    NamespaceContainsPattern { name: String },
    /// Two namespaces share a name.
    DuplicateNamespace { name: String },
    /// TTL must be positive.
    NonPositiveTtl { name: String },
    /// Redis URL is missing or malformed.
    InvalidRedisUrl { url: String },
    /// Key prefix is empty or contains the key separator or a pattern metacharacter.
    InvalidKeyPrefix { prefix: String },
    /// Pool size must be positive.
    InvalidPoolSize,
}

impl fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyNamespace => write!(f, "Cache namespace name cannot be empty"),
            Self::NamespaceContainsSeparator { name } => {
                write!(f, "Cache namespace '{}' must not contain '{}'", name, KEY_SEPARATOR)
            }
            Self::NamespaceContainsPattern { name } => {
                write!(f, "Cache namespace '{}' must not contain any of * ? [ ] \\", name)
            }
            Self::DuplicateNamespace { name } => {
                write!(f, "Cache namespace '{}' is configured more than once", name)
            }
            Self::NonPositiveTtl { name } => {
                write!(f, "TTL of cache namespace '{}' must be positive", name)
            }
            Self::InvalidRedisUrl { url } => {
                write!(f, "Invalid redis URL '{}': must start with redis:// or rediss://", url)
            }
            Self::InvalidKeyPrefix { prefix } => {
                write!(f, "Invalid key prefix '{}'", prefix)
            }
            Self::InvalidPoolSize => write!(f, "Redis pool size must be positive"),
        }
    }
}

impl std::error::Error for ConfigValidationError {}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates the entire application configuration.
    ///
    /// Returns Ok(()) if valid, or Err with all validation errors found.
    pub fn validate(config: &AppConfig) -> Result<(), Vec<ConfigValidationError>> {
        let mut errors = Vec::new();

        Self::validate_cache(&config.cache, &mut errors);
        if config.cache.backend == CacheBackend::Redis {
            Self::validate_redis(&config.redis, &mut errors);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn validate_cache(config: &CacheConfig, errors: &mut Vec<ConfigValidationError>) {
        let all = std::iter::once(&config.default).chain(config.namespaces());
        let mut seen: Vec<&str> = Vec::new();

        for ns in all {
            Self::validate_namespace(ns, errors);
            if seen.contains(&ns.name.as_str()) {
                errors.push(ConfigValidationError::DuplicateNamespace { name: ns.name.clone() });
            }
            seen.push(&ns.name);
        }
    }

    fn validate_namespace(ns: &NamespaceConfig, errors: &mut Vec<ConfigValidationError>) {
        if ns.name.is_empty() {
            errors.push(ConfigValidationError::EmptyNamespace);
        } else if ns.name.contains(KEY_SEPARATOR) {
            errors.push(ConfigValidationError::NamespaceContainsSeparator { name: ns.name.clone() });
        } else if contains_pattern_metacharacter(&ns.name) {
            errors.push(ConfigValidationError::NamespaceContainsPattern { name: ns.name.clone() });
        }

        if ns.ttl_secs == 0 {
            errors.push(ConfigValidationError::NonPositiveTtl { name: ns.name.clone() });
        }
    }

    fn validate_redis(config: &RedisConfig, errors: &mut Vec<ConfigValidationError>) {
        if !config.enabled {
            return;
        }

        if !config.url.starts_with("redis://") && !config.url.starts_with("rediss://") {
            errors.push(ConfigValidationError::InvalidRedisUrl { url: config.url.clone() });
        }

        if config.key_prefix.is_empty()
            || config.key_prefix.contains(KEY_SEPARATOR)
            || contains_pattern_metacharacter(&config.key_prefix)
        {
            errors.push(ConfigValidationError::InvalidKeyPrefix {
                prefix: config.key_prefix.clone(),
            });
        }

        if config.pool_size == 0 {
            errors.push(ConfigValidationError::InvalidPoolSize);
        }
    }
}

/// Formats validation errors for display.
pub fn format_validation_errors(errors: &[ConfigValidationError]) -> String {
    let mut output = String::from("Configuration validation failed:\n");
    for (i, error) in errors.iter().enumerate() {
        output.push_str(&format!("  {}. {}\n", i + 1, error));
    }
    output
}
