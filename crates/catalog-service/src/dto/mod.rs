//! Data Transfer Objects.
//!
//! Responses are what the cache stores; requests carry the fields a client
//! may set.

mod category_dto;
mod person_dto;
mod product_dto;

pub use category_dto::*;
pub use person_dto::*;
pub use product_dto::*;

use catalog_core::{CatalogError, CatalogResult};

fn require_name(resource: &str, name: &str) -> CatalogResult<()> {
    if name.trim().is_empty() {
        return Err(CatalogError::validation(format!("{} name cannot be blank", resource)));
    }
    Ok(())
}
