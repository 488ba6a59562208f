//! Entity service trait definition.

use async_trait::async_trait;
use catalog_core::CatalogResult;

/// CRUD service over one cached entity type.
#[async_trait]
pub trait EntityService: Send + Sync {
    /// Entity identifier.
    type Id: Send + 'static;
    /// Create/update payload.
    type Request: Send + 'static;
    /// Returned (and cached) representation.
    type Response: Send + 'static;

    /// Lists every entity.
    async fn get_all(&self) -> CatalogResult<Vec<Self::Response>>;

    /// Gets one entity. A missing id is `NotFound`.
    async fn get_by_id(&self, id: Self::Id) -> CatalogResult<Self::Response>;

    /// Creates an entity.
    async fn create(&self, request: Self::Request) -> CatalogResult<Self::Response>;

    /// Updates an entity. A missing id is `NotFound`.
    async fn update(&self, id: Self::Id, request: Self::Request) -> CatalogResult<Self::Response>;

    /// Deletes an entity. A missing id is `NotFound`.
    async fn delete(&self, id: Self::Id) -> CatalogResult<()>;

    /// Drops every cached entry of this entity type.
    async fn clear_cache(&self);
}
