//! Scripted tour of the cache behaviour.
//!
//! Each step logs how long it took, so cache hits and store loads are
//! visible side by side in the output.

use catalog_core::{CatalogResult, CategoryId, PersonId, ProductId};
use catalog_service::{CatalogServices, CategoryRequest, EntityService, PersonRequest, ProductRequest};
use chrono::NaiveDate;
use std::future::Future;
use std::time::Instant;
use tracing::info;

async fn step<T, F>(label: &str, operation: F) -> CatalogResult<T>
where
    F: Future<Output = CatalogResult<T>>,
{
    let started = Instant::now();
    let result = operation.await;
    info!(
        step = label,
        elapsed_us = started.elapsed().as_micros(),
        ok = result.is_ok(),
        "Walk-through step"
    );
    result
}

/// Runs the walk-through: cold and warm reads, a write-through update, an
/// invalidating update, a create, a delete and a full clear.
pub async fn run(services: &CatalogServices) -> CatalogResult<()> {
    let persons = &services.persons;
    let products = &services.products;
    let categories = &services.categories;

    step("persons: cold get_all", persons.get_all()).await?;
    step("persons: warm get_all", persons.get_all()).await?;
    step("persons: cold get_by_id(1)", persons.get_by_id(PersonId::new(1))).await?;
    step("persons: warm get_by_id(1)", persons.get_by_id(PersonId::new(1))).await?;

    let request = PersonRequest::new("Augusta Ada King", NaiveDate::from_ymd_opt(1815, 12, 10));
    step("persons: update(1)", persons.update(PersonId::new(1), request)).await?;
    step("persons: get_by_id(1) after write-through", persons.get_by_id(PersonId::new(1))).await?;
    step("persons: get_all after update", persons.get_all()).await?;

    step("products: get_by_id(2)", products.get_by_id(ProductId::new(2))).await?;
    let request = ProductRequest::new("Mechanical keyboard", Some("Full size".to_string()), 99.0)
        .in_category(CategoryId::new(2));
    step("products: update(2)", products.update(ProductId::new(2), request)).await?;
    step("products: get_by_id(2) after invalidate", products.get_by_id(ProductId::new(2))).await?;

    step("categories: create", categories.create(CategoryRequest::new("Garden", None))).await?;
    step("products: delete(3)", products.delete(ProductId::new(3))).await?;

    services.clear_caches().await;
    info!("Walk-through complete, caches cleared");
    Ok(())
}
