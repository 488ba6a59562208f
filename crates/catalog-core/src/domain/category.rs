//! Category entity.

use crate::{CategoryId, Entity};
use serde::{Deserialize, Serialize};

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: Option<CategoryId>,
    pub name: String,
    pub description: Option<String>,
}

impl Category {
    /// Creates a category that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, description: Option<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            description,
        }
    }
}

impl Entity for Category {
    type Id = CategoryId;

    const RESOURCE_TYPE: &'static str = "Category";

    fn id(&self) -> Option<CategoryId> {
        self.id
    }

    fn assign_id(&mut self, id: CategoryId) {
        self.id = Some(id);
    }
}
