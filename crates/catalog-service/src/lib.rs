//! # Catalog Service
//!
//! Category, product and person services. Reads go through the entity
//! cache first and fall back to the repository on a miss; mutations are
//! persisted first and then reflected in the cache according to the
//! namespace's [`MutationPolicy`].

pub mod cache_aside;
pub mod dto;
pub mod entity_service;
pub mod r#impl;
pub mod mappers;
pub mod services;

pub use cache_aside::{Mutation, MutationPolicy};
pub use dto::*;
pub use entity_service::EntityService;
pub use mappers::*;
pub use r#impl::CachedEntityService;
pub use services::{CatalogRepositories, CatalogServices, CategoryService, PersonService, ProductService};
