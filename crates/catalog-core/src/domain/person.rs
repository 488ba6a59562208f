//! Person entity.

use crate::{Entity, PersonId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A person record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Person {
    pub id: Option<PersonId>,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
}

impl Person {
    /// Creates a person that has not been persisted yet.
    #[must_use]
    pub fn new(name: impl Into<String>, birth_date: Option<NaiveDate>) -> Self {
        Self {
            id: None,
            name: name.into(),
            birth_date,
        }
    }
}

impl Entity for Person {
    type Id = PersonId;

    const RESOURCE_TYPE: &'static str = "Person";

    fn id(&self) -> Option<PersonId> {
        self.id
    }

    fn assign_id(&mut self, id: PersonId) {
        self.id = Some(id);
    }
}
