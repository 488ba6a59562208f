//! Product DTOs.

use catalog_cache::{CacheableEntity, Cacheable};
use catalog_core::{CatalogError, CatalogResult, CategoryId, ProductId};
use serde::{Deserialize, Serialize};

/// Request to create or update a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_id: Option<CategoryId>,
}

impl ProductRequest {
    /// Creates a request without a category.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            name: name.into(),
            description,
            price,
            category_id: None,
        }
    }

    /// Sets the category.
    #[must_use]
    pub fn in_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Checks the request fields.
    pub fn validate(&self) -> CatalogResult<()> {
        super::require_name("Product", &self.name)?;
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::validation(format!(
                "Product price must be a non-negative amount, got {}",
                self.price
            )));
        }
        Ok(())
    }
}

/// Product response with the category flattened to its name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductResponse {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category_name: Option<String>,
}

impl Cacheable for ProductResponse {
    const TYPE_NAME: &'static str = "ProductResponse";
}

impl CacheableEntity for ProductResponse {
    type Id = ProductId;
    const NAMESPACE: &'static str = "products";

    fn cache_id(&self) -> Option<ProductId> {
        self.id
    }
}
