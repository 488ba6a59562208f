//! In-memory repository.

use crate::traits::CrudRepository;
use async_trait::async_trait;
use catalog_core::{CatalogResult, Entity};
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Repository keeping entities in an ordered map.
///
/// Ids are drawn from a monotonically increasing sequence starting at 1.
/// Saving an entity with an explicit id advances the sequence past it.
/// Reads can be given an artificial latency to stand in for a remote store.
pub struct InMemoryRepository<E: Entity> {
    entities: RwLock<BTreeMap<E::Id, E>>,
    sequence: AtomicI64,
    query_delay: Duration,
}

impl<E: Entity> InMemoryRepository<E> {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entities: RwLock::new(BTreeMap::new()),
            sequence: AtomicI64::new(0),
            query_delay: Duration::ZERO,
        }
    }

    /// Creates a repository holding the given entities.
    #[must_use]
    pub fn with_entities(entities: impl IntoIterator<Item = E>) -> Self {
        let repo = Self::new();
        for entity in entities {
            repo.store(entity);
        }
        repo
    }

    /// Delays every `find_all` and `find_by_id` by `delay`.
    #[must_use]
    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    async fn simulate_latency(&self) {
        if !self.query_delay.is_zero() {
            tokio::time::sleep(self.query_delay).await;
        }
    }

    fn next_id(&self) -> E::Id {
        E::Id::from(self.sequence.fetch_add(1, Ordering::SeqCst) + 1)
    }

    fn store(&self, mut entity: E) -> E {
        let id = match entity.id() {
            Some(id) => id,
            None => {
                let id = self.next_id();
                entity.assign_id(id);
                id
            }
        };
        self.advance_past(id);
        self.entities.write().insert(id, entity.clone());
        entity
    }

    fn advance_past(&self, id: E::Id) {
        self.sequence.fetch_max(id.into(), Ordering::SeqCst);
    }
}

impl<E: Entity> Default for InMemoryRepository<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Entity> std::fmt::Debug for InMemoryRepository<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemoryRepository")
            .field("resource_type", &E::RESOURCE_TYPE)
            .field("len", &self.entities.read().len())
            .field("query_delay", &self.query_delay)
            .finish()
    }
}

#[async_trait]
impl<E: Entity> CrudRepository<E> for InMemoryRepository<E> {
    async fn find_all(&self) -> CatalogResult<Vec<E>> {
        self.simulate_latency().await;
        let entities: Vec<E> = self.entities.read().values().cloned().collect();
        debug!(resource = E::RESOURCE_TYPE, count = entities.len(), "find_all");
        Ok(entities)
    }

    async fn find_by_id(&self, id: E::Id) -> CatalogResult<Option<E>> {
        self.simulate_latency().await;
        debug!(resource = E::RESOURCE_TYPE, %id, "find_by_id");
        Ok(self.entities.read().get(&id).cloned())
    }

    async fn save(&self, entity: E) -> CatalogResult<E> {
        let saved = self.store(entity);
        debug!(resource = E::RESOURCE_TYPE, id = ?saved.id(), "save");
        Ok(saved)
    }

    async fn delete_by_id(&self, id: E::Id) -> CatalogResult<bool> {
        let deleted = self.entities.write().remove(&id).is_some();
        debug!(resource = E::RESOURCE_TYPE, %id, deleted, "delete_by_id");
        Ok(deleted)
    }

    async fn count(&self) -> CatalogResult<u64> {
        Ok(self.entities.read().len() as u64)
    }
}
