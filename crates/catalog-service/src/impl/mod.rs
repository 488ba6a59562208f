//! Service implementations.

mod cached_entity_service;

pub use cached_entity_service::CachedEntityService;
