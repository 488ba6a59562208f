//! Product mapping.

use super::EntityMapper;
use crate::dto::{ProductRequest, ProductResponse};
use async_trait::async_trait;
use catalog_core::{CatalogError, CatalogResult, Category, CategoryId, Entity, Product};
use catalog_repository::CrudRepository;
use std::sync::Arc;

impl From<Product> for ProductResponse {
    fn from(product: Product) -> Self {
        let category_name = product.category_name().map(str::to_owned);
        Self {
            id: product.id,
            name: product.name,
            description: product.description,
            price: product.price,
            category_name,
        }
    }
}

/// Maps products, resolving the requested category from the category store.
#[derive(Clone)]
pub struct ProductMapper {
    categories: Arc<dyn CrudRepository<Category>>,
}

impl ProductMapper {
    /// Creates a mapper resolving categories from `categories`.
    #[must_use]
    pub fn new(categories: Arc<dyn CrudRepository<Category>>) -> Self {
        Self { categories }
    }

    async fn resolve_category(&self, id: Option<CategoryId>) -> CatalogResult<Option<Category>> {
        let Some(id) = id else {
            return Ok(None);
        };
        self.categories
            .find_by_id(id)
            .await?
            .map(Some)
            .ok_or_else(|| CatalogError::not_found(Category::RESOURCE_TYPE, id))
    }
}

impl std::fmt::Debug for ProductMapper {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductMapper").finish_non_exhaustive()
    }
}

#[async_trait]
impl EntityMapper for ProductMapper {
    type Entity = Product;
    type Request = ProductRequest;
    type Response = ProductResponse;

    fn to_response(&self, entity: Product) -> ProductResponse {
        ProductResponse::from(entity)
    }

    async fn into_entity(&self, request: ProductRequest) -> CatalogResult<Product> {
        request.validate()?;
        let category = self.resolve_category(request.category_id).await?;
        let mut product = Product::new(request.name, request.description, request.price);
        product.category = category;
        Ok(product)
    }

    async fn apply_to(&self, entity: &mut Product, request: ProductRequest) -> CatalogResult<()> {
        request.validate()?;
        entity.category = self.resolve_category(request.category_id).await?;
        entity.name = request.name;
        entity.description = request.description;
        entity.price = request.price;
        Ok(())
    }
}
