//! End-to-end cache-aside behaviour of the catalog services.

mod common;

use catalog_config::{CacheConfig, WriteMode};
use catalog_core::{Category, CategoryId, Person, PersonId, Product, ProductId};
use catalog_repository::{CrudRepository, InMemoryRepository};
use catalog_service::{
    CatalogRepositories, CatalogServices, CategoryRequest, EntityService, PersonRequest,
    ProductRequest,
};
use chrono::NaiveDate;
use common::{backends, failing_port, unconfigured_port, CountingRepository};
use std::sync::Arc;

fn seeded_persons() -> Vec<Person> {
    (1..=7)
        .map(|i| Person::new(format!("person-{i}"), NaiveDate::from_ymd_opt(1990, 1, i)))
        .collect()
}

fn seeded_products() -> Vec<Product> {
    vec![
        Product::new("Lamp", None, 30.0),
        Product::new("Desk", Some("Oak".to_string()), 250.0),
    ]
}

struct Fixture {
    services: CatalogServices,
    categories: Arc<CountingRepository<Category>>,
    products: Arc<CountingRepository<Product>>,
    persons: Arc<CountingRepository<Person>>,
}

fn fixture(port: Arc<dyn catalog_cache::CachePort>, config: &CacheConfig) -> Fixture {
    let categories = CountingRepository::new([Category::new("Office", None)]);
    let products = CountingRepository::new(seeded_products());
    let persons = CountingRepository::new(seeded_persons());

    let repositories = CatalogRepositories {
        categories: categories.clone(),
        products: products.clone(),
        persons: persons.clone(),
    };
    let services = CatalogServices::new(port, config, repositories).expect("wiring");

    Fixture {
        services,
        categories,
        products,
        persons,
    }
}

#[tokio::test]
async fn test_get_by_id_loads_once() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        let first = f.services.persons.get_by_id(PersonId::new(7)).await.unwrap();
        assert_eq!(f.persons.loads(), 1, "{}", backend.name);
        assert_eq!(first.name, "person-7");

        let second = f.services.persons.get_by_id(PersonId::new(7)).await.unwrap();
        assert_eq!(f.persons.loads(), 1, "{}", backend.name);
        assert_eq!(second, first);
    }
}

#[tokio::test]
async fn test_get_all_loads_once() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        let first = f.services.products.get_all().await.unwrap();
        let second = f.services.products.get_all().await.unwrap();

        assert_eq!(first.len(), 2);
        assert_eq!(first, second);
        assert_eq!(f.products.loads(), 1, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_write_through_update() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());
        let id = PersonId::new(5);

        f.services.persons.get_all().await.unwrap();
        f.services.persons.get_by_id(id).await.unwrap();

        let updated = f
            .services
            .persons
            .update(id, PersonRequest::new("Grace", NaiveDate::from_ymd_opt(1906, 12, 9)))
            .await
            .unwrap();
        let after_update = f.persons.loads();

        let fetched = f.services.persons.get_by_id(id).await.unwrap();
        assert_eq!(fetched, updated, "{}", backend.name);
        assert_eq!(fetched.name, "Grace");
        assert_eq!(f.persons.loads(), after_update, "{}", backend.name);

        let all = f.services.persons.get_all().await.unwrap();
        assert_eq!(f.persons.loads(), after_update + 1, "{}", backend.name);
        assert!(all.contains(&updated));
    }
}

#[tokio::test]
async fn test_invalidate_update() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());
        let id = ProductId::new(1);

        f.services.products.get_by_id(id).await.unwrap();

        f.services
            .products
            .update(id, ProductRequest::new("Floor lamp", None, 45.0))
            .await
            .unwrap();
        let after_update = f.products.loads();

        let fetched = f.services.products.get_by_id(id).await.unwrap();
        assert_eq!(fetched.name, "Floor lamp");
        assert_eq!(f.products.loads(), after_update + 1, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_write_through_create() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        let all_before = f.services.categories.get_all().await.unwrap();
        let created = f
            .services
            .categories
            .create(CategoryRequest::new("Garden", None))
            .await
            .unwrap();
        let loads = f.categories.loads();

        let id = created.id.expect("assigned id");
        assert_eq!(f.services.categories.get_by_id(id).await.unwrap(), created);
        assert_eq!(f.categories.loads(), loads, "{}", backend.name);

        let all_after = f.services.categories.get_all().await.unwrap();
        assert_eq!(all_after.len(), all_before.len() + 1, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_invalidate_create() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        f.services.products.get_all().await.unwrap();
        let created = f
            .services
            .products
            .create(ProductRequest::new("Chair", None, 80.0).in_category(CategoryId::new(1)))
            .await
            .unwrap();
        assert_eq!(created.category_name.as_deref(), Some("Office"));
        let loads = f.products.loads();

        f.services.products.get_by_id(created.id.expect("id")).await.unwrap();
        assert_eq!(f.products.loads(), loads + 1, "{}", backend.name);

        assert_eq!(f.services.products.get_all().await.unwrap().len(), 3);
    }
}

#[tokio::test]
async fn test_configured_policy_overrides_default() {
    let mut config = CacheConfig::default();
    config.persons.on_update = WriteMode::Invalidate;

    for backend in backends() {
        let f = fixture(backend.port, &config);
        let id = PersonId::new(2);

        f.services.persons.get_by_id(id).await.unwrap();
        f.services
            .persons
            .update(id, PersonRequest::new("Edsger", None))
            .await
            .unwrap();
        let loads = f.persons.loads();

        f.services.persons.get_by_id(id).await.unwrap();
        assert_eq!(f.persons.loads(), loads + 1, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_delete_evicts_id_and_all() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());
        let id = PersonId::new(3);

        f.services.persons.get_all().await.unwrap();
        f.services.persons.get_by_id(id).await.unwrap();

        f.services.persons.delete(id).await.unwrap();

        let err = f.services.persons.get_by_id(id).await.unwrap_err();
        assert!(err.is_not_found(), "{}", backend.name);

        let all = f.services.persons.get_all().await.unwrap();
        assert_eq!(all.len(), 6);
        assert!(all.iter().all(|p| p.id != Some(id)));
    }
}

#[tokio::test]
async fn test_delete_missing_is_not_found() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        let err = f.services.categories.delete(CategoryId::new(99)).await.unwrap_err();

        assert!(err.is_not_found(), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_update_missing_is_not_found() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        let err = f
            .services
            .persons
            .update(PersonId::new(99), PersonRequest::new("Nobody", None))
            .await
            .unwrap_err();

        assert!(err.is_not_found(), "{}", backend.name);
    }
}

#[tokio::test]
async fn test_clear_cache_forces_reload() {
    for backend in backends() {
        let f = fixture(backend.port, &CacheConfig::default());

        f.services.categories.get_all().await.unwrap();
        f.services.persons.get_all().await.unwrap();

        f.services.categories.clear_cache().await;

        f.services.categories.get_all().await.unwrap();
        f.services.persons.get_all().await.unwrap();
        assert_eq!(f.categories.loads(), 2, "{}", backend.name);
        assert_eq!(f.persons.loads(), 1, "{}", backend.name);

        f.services.clear_caches().await;
        f.services.persons.get_all().await.unwrap();
        assert_eq!(f.persons.loads(), 2, "{}", backend.name);
    }
}

#[tokio::test]
async fn test_services_work_with_failing_cache() {
    for port in [failing_port(), unconfigured_port()] {
        let f = fixture(port, &CacheConfig::default());

        assert_eq!(f.services.persons.get_all().await.unwrap().len(), 7);
        assert_eq!(f.services.persons.get_all().await.unwrap().len(), 7);
        assert_eq!(f.persons.loads(), 2);

        let created = f
            .services
            .persons
            .create(PersonRequest::new("Barbara", None))
            .await
            .unwrap();
        let id = created.id.expect("id");
        let updated = f
            .services
            .persons
            .update(id, PersonRequest::new("Barbara L.", None))
            .await
            .unwrap();
        assert_eq!(f.services.persons.get_by_id(id).await.unwrap(), updated);

        f.services.persons.delete(id).await.unwrap();
        assert!(f.services.persons.get_by_id(id).await.unwrap_err().is_not_found());
        f.services.persons.clear_cache().await;
    }
}

#[tokio::test]
async fn test_repository_stays_authoritative() {
    for backend in backends() {
        let persons = Arc::new(InMemoryRepository::with_entities(seeded_persons()));
        let repositories = CatalogRepositories {
            persons: persons.clone(),
            ..CatalogRepositories::in_memory()
        };
        let services =
            CatalogServices::new(backend.port, &CacheConfig::default(), repositories).unwrap();

        let cached = services.persons.get_by_id(PersonId::new(1)).await.unwrap();

        // A write that bypasses the service is not visible until the entry is evicted.
        let mut changed = persons.find_by_id(PersonId::new(1)).await.unwrap().unwrap();
        changed.name = "changed".to_string();
        persons.save(changed).await.unwrap();
        assert_eq!(services.persons.get_by_id(PersonId::new(1)).await.unwrap(), cached);

        services.persons.clear_cache().await;
        assert_eq!(
            services.persons.get_by_id(PersonId::new(1)).await.unwrap().name,
            "changed"
        );
    }
}
