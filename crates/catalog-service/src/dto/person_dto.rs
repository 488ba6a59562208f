//! Person DTOs.

use catalog_cache::{CacheableEntity, Cacheable};
use catalog_core::{CatalogResult, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Request to create or update a person.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonRequest {
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl PersonRequest {
    /// Creates a request.
    #[must_use]
    pub fn new(name: impl Into<String>, birth_date: Option<NaiveDate>) -> Self {
        Self {
            name: name.into(),
            birth_date,
        }
    }

    /// Checks the request fields.
    pub fn validate(&self) -> CatalogResult<()> {
        super::require_name("Person", &self.name)
    }
}

/// Person response, cached under the person id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonResponse {
    pub id: Option<PersonId>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl Cacheable for PersonResponse {
    const TYPE_NAME: &'static str = "PersonResponse";
}

impl CacheableEntity for PersonResponse {
    type Id = PersonId;
    const NAMESPACE: &'static str = "persons";

    fn cache_id(&self) -> Option<PersonId> {
        self.id
    }
}
