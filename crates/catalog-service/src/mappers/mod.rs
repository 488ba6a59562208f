//! Entity to DTO mappers.
//!
//! Responses are built with `From<Entity>`. Turning a request into an entity,
//! and copying a request onto an existing entity, go through an
//! [`EntityMapper`] because some of them need the store (a product request
//! names its category by id).

mod category_mapper;
mod person_mapper;
mod product_mapper;

pub use category_mapper::CategoryMapper;
pub use person_mapper::PersonMapper;
pub use product_mapper::ProductMapper;

use async_trait::async_trait;
use catalog_cache::CacheableEntity;
use catalog_core::{CatalogResult, Entity};

/// Maps between an entity, its request and its cached response.
#[async_trait]
pub trait EntityMapper: Send + Sync + 'static {
    /// Persisted entity.
    type Entity: Entity;
    /// Create/update payload.
    type Request: Send + Sync + 'static;
    /// Cached representation.
    type Response: CacheableEntity<Id = <Self::Entity as Entity>::Id> + Clone;

    /// Builds the response of a persisted entity.
    fn to_response(&self, entity: Self::Entity) -> Self::Response;

    /// Builds a new, unsaved entity from a request.
    async fn into_entity(&self, request: Self::Request) -> CatalogResult<Self::Entity>;

    /// Copies the request fields onto an existing entity.
    async fn apply_to(&self, entity: &mut Self::Entity, request: Self::Request) -> CatalogResult<()>;

    /// Builds responses for a list of entities.
    fn to_responses(&self, entities: Vec<Self::Entity>) -> Vec<Self::Response> {
        entities.into_iter().map(|e| self.to_response(e)).collect()
    }
}
