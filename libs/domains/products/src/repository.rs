use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{DbErr, SqlErr};
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::audit::{AuditContext, AuditInfo, Audited};
use crate::models::Product;

/// Unique index on `LOWER(name)`.
pub const NAME_UNIQUE_CONSTRAINT: &str = "ux_products_name_lower";

/// `CHECK (quantity >= 0)`.
pub const QUANTITY_CHECK_CONSTRAINT: &str = "ck_products_quantity_non_negative";

const PRIMARY_KEY_CONSTRAINT: &str = "products_pkey";

/// Intent of a read. Adapters may use it to skip change tracking or to lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tracking {
    ReadOnly,
    ForUpdate,
}

/// One staged modification.
#[derive(Debug, Clone, PartialEq)]
pub enum Change {
    Added(Product),
    Modified(Product),
    Removed(Product),
}

/// Changes staged for a single commit, applied in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChangeSet {
    changes: Vec<Change>,
}

impl ChangeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, product: Product) {
        self.changes.push(Change::Added(product));
    }

    pub fn update(&mut self, product: Product) {
        self.changes.push(Change::Modified(product));
    }

    pub fn remove(&mut self, product: Product) {
        self.changes.push(Change::Removed(product));
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Change> {
        self.changes.iter()
    }
}

impl IntoIterator for ChangeSet {
    type Item = Change;
    type IntoIter = std::vec::IntoIter<Change>;

    fn into_iter(self) -> Self::IntoIter {
        self.changes.into_iter()
    }
}

#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Unique constraint '{constraint}' violated")]
    UniqueViolation { constraint: String },

    #[error("Check constraint '{constraint}' violated")]
    CheckViolation { constraint: String },

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Database error: {0}")]
    Database(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<DbErr> for RepositoryError {
    fn from(err: DbErr) -> Self {
        let detail = err.to_string();

        if detail.contains(NAME_UNIQUE_CONSTRAINT) {
            return Self::UniqueViolation {
                constraint: NAME_UNIQUE_CONSTRAINT.to_string(),
            };
        }
        if detail.contains(QUANTITY_CHECK_CONSTRAINT) {
            return Self::CheckViolation {
                constraint: QUANTITY_CHECK_CONSTRAINT.to_string(),
            };
        }

        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(constraint)) => {
                Self::UniqueViolation { constraint }
            }
            _ => Self::Database(detail),
        }
    }
}

/// Storage port for products: named queries plus a unit-of-work commit.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// All products, oldest first.
    async fn find_all(&self, tracking: Tracking) -> RepositoryResult<Vec<Audited<Product>>>;

    async fn find_by_id(
        &self,
        id: Uuid,
        tracking: Tracking,
    ) -> RepositoryResult<Option<Audited<Product>>>;

    /// Whether another product already uses `name`, compared trimmed and
    /// case-insensitively. `excluding` skips one id (the product being updated).
    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> RepositoryResult<bool>;

    /// Persists `changes` atomically, stamping audit columns from `audit`.
    ///
    /// Returns the stored state of added and modified products in staging
    /// order. Nothing is persisted if `cancel` fires before the commit
    /// completes or if any change violates a constraint.
    async fn commit(
        &self,
        changes: ChangeSet,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Audited<Product>>>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Enforces the same constraints as the PostgreSQL schema so that callers
/// observe identical conflict behaviour.
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<Uuid, Audited<Product>>>>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

fn same_name(a: &str, b: &str) -> bool {
    a.trim().to_lowercase() == b.trim().to_lowercase()
}

fn check_constraints(
    rows: &HashMap<Uuid, Audited<Product>>,
    product: &Product,
) -> RepositoryResult<()> {
    if product.quantity() < 0 {
        return Err(RepositoryError::CheckViolation {
            constraint: QUANTITY_CHECK_CONSTRAINT.to_string(),
        });
    }
    let taken = rows
        .values()
        .any(|p| p.id() != product.id() && same_name(p.name(), product.name()));
    if taken {
        return Err(RepositoryError::UniqueViolation {
            constraint: NAME_UNIQUE_CONSTRAINT.to_string(),
        });
    }
    Ok(())
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn find_all(&self, _tracking: Tracking) -> RepositoryResult<Vec<Audited<Product>>> {
        let products = self.products.read().await;
        let mut all: Vec<_> = products.values().cloned().collect();
        all.sort_by(|a, b| {
            a.audit()
                .created
                .cmp(&b.audit().created)
                .then_with(|| a.id().cmp(&b.id()))
        });
        Ok(all)
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        _tracking: Tracking,
    ) -> RepositoryResult<Option<Audited<Product>>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> RepositoryResult<bool> {
        let products = self.products.read().await;
        Ok(products
            .values()
            .any(|p| Some(p.id()) != excluding && same_name(p.name(), name)))
    }

    async fn commit(
        &self,
        changes: ChangeSet,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> RepositoryResult<Vec<Audited<Product>>> {
        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        let mut products = self.products.write().await;
        // Work on a copy so a failing change leaves the store untouched.
        let mut staged = products.clone();
        let now = Utc::now();
        let mut persisted = Vec::new();

        for change in changes {
            match change {
                Change::Added(product) => {
                    if staged.contains_key(&product.id()) {
                        return Err(RepositoryError::UniqueViolation {
                            constraint: PRIMARY_KEY_CONSTRAINT.to_string(),
                        });
                    }
                    check_constraints(&staged, &product)?;
                    let row = Audited::new(
                        product,
                        AuditInfo {
                            created: now,
                            created_by: audit.user().to_string(),
                            last_modified: None,
                            last_modified_by: None,
                        },
                    );
                    staged.insert(row.id(), row.clone());
                    persisted.push(row);
                }
                Change::Modified(product) => {
                    check_constraints(&staged, &product)?;
                    let Some(existing) = staged.get(&product.id()) else {
                        return Err(RepositoryError::Database(format!(
                            "None of the records are updated: product {}",
                            product.id()
                        )));
                    };
                    let row = Audited::new(
                        product,
                        AuditInfo {
                            last_modified: Some(now),
                            last_modified_by: Some(audit.user().to_string()),
                            ..existing.audit().clone()
                        },
                    );
                    staged.insert(row.id(), row.clone());
                    persisted.push(row);
                }
                Change::Removed(product) => {
                    staged.remove(&product.id());
                }
            }
        }

        if cancel.is_cancelled() {
            return Err(RepositoryError::Cancelled);
        }

        *products = staged;
        tracing::debug!(rows = persisted.len(), "Committed product changes");
        Ok(persisted)
    }
}
