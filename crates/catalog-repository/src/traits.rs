//! Repository traits.

use async_trait::async_trait;
use catalog_core::{CatalogResult, Entity};

/// CRUD access to one entity type.
#[async_trait]
pub trait CrudRepository<E: Entity>: Send + Sync {
    /// Loads every entity, ordered by id.
    async fn find_all(&self) -> CatalogResult<Vec<E>>;

    /// Loads one entity.
    async fn find_by_id(&self, id: E::Id) -> CatalogResult<Option<E>>;

    /// Inserts or replaces an entity, assigning an id when it has none.
    ///
    /// Returns the stored entity.
    async fn save(&self, entity: E) -> CatalogResult<E>;

    /// Deletes an entity. Returns false when nothing was deleted.
    async fn delete_by_id(&self, id: E::Id) -> CatalogResult<bool>;

    /// Counts stored entities.
    async fn count(&self) -> CatalogResult<u64>;

    /// Checks whether an entity exists.
    async fn exists_by_id(&self, id: E::Id) -> CatalogResult<bool> {
        Ok(self.find_by_id(id).await?.is_some())
    }
}
