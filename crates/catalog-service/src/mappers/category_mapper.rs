//! Category mapping.

use super::EntityMapper;
use crate::dto::{CategoryRequest, CategoryResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Category};

impl From<Category> for CategoryResponse {
    fn from(category: Category) -> Self {
        Self {
            id: category.id,
            name: category.name,
            description: category.description,
        }
    }
}

/// Maps categories.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryMapper;

#[async_trait]
impl EntityMapper for CategoryMapper {
    type Entity = Category;
    type Request = CategoryRequest;
    type Response = CategoryResponse;

    fn to_response(&self, entity: Category) -> CategoryResponse {
        CategoryResponse::from(entity)
    }

    async fn into_entity(&self, request: CategoryRequest) -> CatalogResult<Category> {
        request.validate()?;
        Ok(Category::new(request.name, request.description))
    }

    async fn apply_to(&self, entity: &mut Category, request: CategoryRequest) -> CatalogResult<()> {
        request.validate()?;
        entity.name = request.name;
        entity.description = request.description;
        Ok(())
    }
}
