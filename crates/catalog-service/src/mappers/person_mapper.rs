//! Person mapping.

use super::EntityMapper;
use crate::dto::{PersonRequest, PersonResponse};
use async_trait::async_trait;
use catalog_core::{CatalogResult, Person};

impl From<Person> for PersonResponse {
    fn from(person: Person) -> Self {
        Self {
            id: person.id,
            name: person.name,
            birth_date: person.birth_date,
        }
    }
}

/// Maps persons.
#[derive(Debug, Clone, Copy, Default)]
pub struct PersonMapper;

#[async_trait]
impl EntityMapper for PersonMapper {
    type Entity = Person;
    type Request = PersonRequest;
    type Response = PersonResponse;

    fn to_response(&self, entity: Person) -> PersonResponse {
        PersonResponse::from(entity)
    }

    async fn into_entity(&self, request: PersonRequest) -> CatalogResult<Person> {
        request.validate()?;
        Ok(Person::new(request.name, request.birth_date))
    }

    async fn apply_to(&self, entity: &mut Person, request: PersonRequest) -> CatalogResult<()> {
        request.validate()?;
        entity.name = request.name;
        entity.birth_date = request.birth_date;
        Ok(())
    }
}
