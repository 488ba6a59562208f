//! Cached values and their runtime type tags.

use crate::{CacheError, CacheResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A value that can be stored in the cache.
///
/// `TYPE_NAME` is written next to the payload and checked on every read, so a
/// value stored as one type is never handed out as another.
pub trait Cacheable: Serialize + DeserializeOwned + Send + Sync + 'static {
    /// Stable runtime type tag.
    const TYPE_NAME: &'static str;
}

/// Runtime shape of a cached value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "snake_case")]
pub enum EntryKind {
    /// A single value.
    Item { type_name: String },
    /// An ordered collection of values.
    List { element_type: String },
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Item { type_name } => f.write_str(type_name),
            Self::List { element_type } => write!(f, "list<{}>", element_type),
        }
    }
}

/// A cached value: a type tag plus the JSON payload.
///
/// TTL is not part of the entry; the backend manages expiry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub kind: EntryKind,
    pub payload: serde_json::Value,
}

impl CacheEntry {
    /// Wraps a single value.
    pub fn item<T: Cacheable>(value: &T) -> CacheResult<Self> {
        let payload = serde_json::to_value(value)?;
        if payload.is_null() {
            return Err(CacheError::NullValue);
        }
        Ok(Self {
            kind: EntryKind::Item {
                type_name: T::TYPE_NAME.to_string(),
            },
            payload,
        })
    }

    /// Wraps an ordered collection of values.
    pub fn list<T: Cacheable>(values: &[T]) -> CacheResult<Self> {
        Ok(Self {
            kind: EntryKind::List {
                element_type: T::TYPE_NAME.to_string(),
            },
            payload: serde_json::to_value(values)?,
        })
    }

    /// Unwraps a single value, checking its type tag.
    pub fn into_item<T: Cacheable>(self) -> CacheResult<T> {
        match &self.kind {
            EntryKind::Item { type_name } if type_name == T::TYPE_NAME => {
                Ok(serde_json::from_value(self.payload)?)
            }
            _ => Err(self.mismatch(T::TYPE_NAME.to_string())),
        }
    }

    /// Unwraps a collection, checking that the entry is a list of `T`.
    pub fn into_list<T: Cacheable>(self) -> CacheResult<Vec<T>> {
        match &self.kind {
            EntryKind::List { element_type } if element_type == T::TYPE_NAME => {
                Ok(serde_json::from_value(self.payload)?)
            }
            _ => Err(self.mismatch(format!("list<{}>", T::TYPE_NAME))),
        }
    }

    /// Encodes the entry for a string-valued store.
    pub fn to_json(&self) -> CacheResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Decodes an entry read from a string-valued store.
    pub fn from_json(raw: &str) -> CacheResult<Self> {
        Ok(serde_json::from_str(raw)?)
    }

    fn mismatch(&self, expected: String) -> CacheError {
        CacheError::TypeMismatch {
            expected,
            actual: self.kind.to_string(),
        }
    }
}
