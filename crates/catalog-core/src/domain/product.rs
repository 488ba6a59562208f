//! Product entity.

use crate::{Category, Entity, ProductId};
use serde::{Deserialize, Serialize};

/// A product, optionally attached to a category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: Option<ProductId>,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Option<Category>,
}

impl Product {
    /// Creates a product that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>, price: f64) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
            price,
            category: None,
        }
    }

    /// Attaches the product to a category.
    #[must_use]
    pub fn with_category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Returns the name of the attached category, if any.
    #[must_use]
    pub fn category_name(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.name.as_str())
    }
}

impl Entity for Product {
    type Id = ProductId;

    const RESOURCE_TYPE: &'static str = "Product";

    fn id(&self) -> Option<ProductId> {
        self.id
    }

    fn assign_id(&mut self, id: ProductId) {
        self.id = Some(id);
    }
}
