//! Errors raised inside cache adapters.
//!
//! These never leave the cache port; they are logged and converted into a
//! miss or a no-op at the port boundary.

use thiserror::Error;

/// Result type for adapter-internal cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache backend errors.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Redis command failed.
    #[error("Redis error: {0}")]
    Redis(#[from] redis::RedisError),

    /// No connection could be taken from the pool.
    #[error("Redis pool error: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    /// Value could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Stored value has a different runtime type than requested.
    #[error("Type mismatch: expected {expected}, found {actual}")]
    TypeMismatch { expected: String, actual: String },

    /// Attempt to cache a null value.
    #[error("Null values are not cached")]
    NullValue,

    /// Any other backend failure.
    #[error("Backend error: {0}")]
    Backend(String),
}

impl CacheError {
    /// Creates a backend error.
    #[must_use]
    pub fn backend<T: Into<String>>(message: T) -> Self {
        Self::Backend(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_mismatch_message() {
        let err = CacheError::TypeMismatch {
            expected: "ProductResponse".to_string(),
            actual: "list<CategoryResponse>".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Type mismatch: expected ProductResponse, found list<CategoryResponse>"
        );
    }

    #[test]
    fn test_backend_constructor() {
        assert_eq!(
            CacheError::backend("connection refused").to_string(),
            "Backend error: connection refused"
        );
    }
}
