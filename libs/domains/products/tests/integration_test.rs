//! Integration tests for Products domain
//!
//! These tests use real PostgreSQL via testcontainers to ensure:
//! - Named queries map to the expected rows
//! - The unique name index and quantity check are enforced by storage
//! - Audit columns are stamped on commit
//!
//! They need Docker and are ignored by default:
//! `cargo test -p domain_products -- --ignored`

use domain_products::*;
use test_utils::{TestDataBuilder, TestDatabase, assertions::*};
use tokio_util::sync::CancellationToken;

fn audit(user: &str) -> AuditContext {
    AuditContext::new(user)
}

// ============================================================================
// Repository Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_commit_and_find_product() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("commit_and_find");

    let product = Product::create(&builder.name("product", "main"), "Integration", 3).unwrap();
    let id = product.id();
    let mut changes = ChangeSet::new();
    changes.add(product);

    let saved = repo
        .commit(changes, &audit("alice"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].audit().created_by, "alice");

    let found = repo.find_by_id(id, Tracking::ReadOnly).await.unwrap();
    let found = assert_some(found, "product should exist");
    assert_eq!(found.name(), builder.name("product", "main"));
    assert_eq!(found.quantity(), 3);
    assert!(found.audit().last_modified.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_find_missing_product_returns_none() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());
    let builder = TestDataBuilder::from_test_name("find_missing");

    let found = repo
        .find_by_id(builder.missing_id(), Tracking::ReadOnly)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_exists_by_name_ignores_case_and_excluded_id() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let product = Product::create("Widget", "A widget", 1).unwrap();
    let id = product.id();
    let mut changes = ChangeSet::new();
    changes.add(product);
    repo.commit(changes, &audit("alice"), &CancellationToken::new())
        .await
        .unwrap();

    assert!(repo.exists_by_name("WIDGET", None).await.unwrap());
    assert!(!repo.exists_by_name("widget", Some(id)).await.unwrap());
    assert!(!repo.exists_by_name("Gadget", None).await.unwrap());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_unique_name_index_wins_over_pre_check() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let mut first = ChangeSet::new();
    first.add(Product::create("Widget", "First", 1).unwrap());
    repo.commit(first, &audit("alice"), &CancellationToken::new())
        .await
        .unwrap();

    let mut second = ChangeSet::new();
    second.add(Product::create("wIdGeT", "Second", 1).unwrap());
    let result = repo
        .commit(second, &audit("bob"), &CancellationToken::new())
        .await;

    assert!(
        matches!(
            &result,
            Err(RepositoryError::UniqueViolation { constraint })
                if constraint == repository::NAME_UNIQUE_CONSTRAINT
        ),
        "Expected UniqueViolation, got {:?}",
        result
    );
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_failed_commit_persists_nothing() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let mut changes = ChangeSet::new();
    changes.add(Product::create("Widget", "First", 1).unwrap());
    changes.add(Product::create("WIDGET", "Duplicate", 1).unwrap());
    let result = repo
        .commit(changes, &audit("alice"), &CancellationToken::new())
        .await;

    assert!(result.is_err());
    assert!(repo.find_all(Tracking::ReadOnly).await.unwrap().is_empty());
}

#[tokio::test]
#[ignore] // Requires Docker
async fn test_update_preserves_created_audit() {
    let db = TestDatabase::new().await;
    let repo = PgProductRepository::new(db.connection());

    let product = Product::create("Widget", "A widget", 1).unwrap();
    let id = product.id();
    let mut changes = ChangeSet::new();
    changes.add(product);
    repo.commit(changes, &audit("alice"), &CancellationToken::new())
        .await
        .unwrap();

    let stored = repo
        .find_by_id(id, Tracking::ForUpdate)
        .await
        .unwrap()
        .unwrap();
    let created = stored.audit().created;
    let mut product = stored.into_entity();
    product.update("Widget", "Changed", 4).unwrap();

    let mut changes = ChangeSet::new();
    changes.update(product);
    repo.commit(changes, &audit("bob"), &CancellationToken::new())
        .await
        .unwrap();

    let reloaded = repo
        .find_by_id(id, Tracking::ReadOnly)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reloaded.description(), "Changed");
    assert_eq!(reloaded.audit().created_by, "alice");
    assert_eq!(reloaded.audit().created, created);
    assert_eq!(reloaded.audit().last_modified_by.as_deref(), Some("bob"));
    assert!(reloaded.audit().last_modified.is_some());
}

// ============================================================================
// Service Tests
// ============================================================================

#[tokio::test]
#[ignore] // Requires Docker
async fn test_service_create_get_delete() {
    let db = TestDatabase::new().await;
    let service = ProductService::new(PgProductRepository::new(db.connection()));
    let cancel = CancellationToken::new();

    let created = service
        .create_product(
            CreateProductRequest {
                name: "Widget".to_string(),
                description: "A widget".to_string(),
                quantity: 5,
            },
            &AuditContext::default(),
            &cancel,
        )
        .await
        .unwrap();
    let id = created.data.unwrap().id;

    let fetched = service.get_product(id, &cancel).await.unwrap();
    assert_eq!(fetched.data.unwrap().name, "Widget");

    let deleted = service
        .delete_product(id, &AuditContext::default(), &cancel)
        .await
        .unwrap();
    assert_eq!(deleted.status, axum_helpers::ResponseStatus::Success);

    let missing = service.get_product(id, &cancel).await.unwrap();
    assert_eq!(missing.status, axum_helpers::ResponseStatus::NotFound);
}
