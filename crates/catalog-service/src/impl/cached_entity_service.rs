//! Cache-aside service over one entity type.

use crate::cache_aside::{self, Mutation, MutationPolicy};
use crate::entity_service::EntityService;
use crate::mappers::EntityMapper;
use async_trait::async_trait;
use catalog_cache::EntityCache;
use catalog_core::{CatalogError, CatalogResult, Entity};
use catalog_repository::CrudRepository;
use std::sync::Arc;
use tracing::{debug, info};

type IdOf<M> = <<M as EntityMapper>::Entity as Entity>::Id;

/// Service reading through an [`EntityCache`] and persisting through a
/// [`CrudRepository`].
pub struct CachedEntityService<M: EntityMapper> {
    repository: Arc<dyn CrudRepository<M::Entity>>,
    mapper: M,
    cache: EntityCache<M::Response>,
    policy: MutationPolicy,
}

impl<M: EntityMapper> CachedEntityService<M> {
    /// Creates a service.
    pub fn new(
        repository: Arc<dyn CrudRepository<M::Entity>>,
        mapper: M,
        cache: EntityCache<M::Response>,
        policy: MutationPolicy,
    ) -> Self {
        Self {
            repository,
            mapper,
            cache,
            policy,
        }
    }

    /// The entity cache.
    pub fn cache(&self) -> &EntityCache<M::Response> {
        &self.cache
    }

    /// The mutation policy.
    pub const fn policy(&self) -> MutationPolicy {
        self.policy
    }

    async fn find_by_id_or_throw(&self, id: IdOf<M>) -> CatalogResult<M::Entity> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CatalogError::not_found(M::Entity::RESOURCE_TYPE, id))
    }
}

impl<M: EntityMapper> std::fmt::Debug for CachedEntityService<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CachedEntityService")
            .field("resource", &M::Entity::RESOURCE_TYPE)
            .field("cache", &self.cache)
            .field("policy", &self.policy)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl<M: EntityMapper> EntityService for CachedEntityService<M> {
    type Id = IdOf<M>;
    type Request = M::Request;
    type Response = M::Response;

    async fn get_all(&self) -> CatalogResult<Vec<M::Response>> {
        info!(resource = M::Entity::RESOURCE_TYPE, "get_all");

        cache_aside::get_or_load_all(&self.cache, || async {
            debug!(resource = M::Entity::RESOURCE_TYPE, "Querying store");
            let entities = self.repository.find_all().await?;
            Ok(self.mapper.to_responses(entities))
        })
        .await
    }

    async fn get_by_id(&self, id: IdOf<M>) -> CatalogResult<M::Response> {
        info!(resource = M::Entity::RESOURCE_TYPE, %id, "get_by_id");

        cache_aside::get_or_load(&self.cache, id, || async move {
            debug!(resource = M::Entity::RESOURCE_TYPE, %id, "Querying store");
            let entity = self.find_by_id_or_throw(id).await?;
            Ok(self.mapper.to_response(entity))
        })
        .await
    }

    async fn create(&self, request: M::Request) -> CatalogResult<M::Response> {
        info!(resource = M::Entity::RESOURCE_TYPE, "create");

        let entity = self.mapper.into_entity(request).await?;
        let saved = self.repository.save(entity).await?;
        let response = self.mapper.to_response(saved);

        self.policy.apply(&self.cache, Mutation::Create, &response).await;
        Ok(response)
    }

    async fn update(&self, id: IdOf<M>, request: M::Request) -> CatalogResult<M::Response> {
        info!(resource = M::Entity::RESOURCE_TYPE, %id, "update");

        let mut entity = self.find_by_id_or_throw(id).await?;
        self.mapper.apply_to(&mut entity, request).await?;

        let saved = self.repository.save(entity).await?;
        let response = self.mapper.to_response(saved);

        self.policy.apply(&self.cache, Mutation::Update, &response).await;
        Ok(response)
    }

    async fn delete(&self, id: IdOf<M>) -> CatalogResult<()> {
        info!(resource = M::Entity::RESOURCE_TYPE, %id, "delete");

        if !self.repository.delete_by_id(id).await? {
            return Err(CatalogError::not_found(M::Entity::RESOURCE_TYPE, id));
        }

        cache_aside::evict_deleted(&self.cache, id).await;
        Ok(())
    }

    async fn clear_cache(&self) {
        info!(resource = M::Entity::RESOURCE_TYPE, "clear_cache");
        self.cache.clear_all_entries().await;
    }
}
