//! Category DTOs.

use catalog_cache::{CacheableEntity, Cacheable};
use catalog_core::{CatalogResult, CategoryId};
use serde::{Deserialize, Serialize};

/// Request to create or update a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRequest {
    pub name: String,
    pub description: Option<String>,
}

impl CategoryRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            name: name.into(),
            description,
        }
    }

    /// Checks the request fields.
    pub fn validate(&self) -> CatalogResult<()> {
        super::require_name("Category", &self.name)
    }
}

/// Category response, cached under the category id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryResponse {
    pub id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
}

impl Cacheable for CategoryResponse {
    const TYPE_NAME: &'static str = "CategoryResponse";
}

impl CacheableEntity for CategoryResponse {
    type Id = CategoryId;
    const NAMESPACE: &'static str = "categories";

    fn cache_id(&self) -> Option<CategoryId> {
        self.id
    }
}
