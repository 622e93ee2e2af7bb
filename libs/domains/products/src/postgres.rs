use async_trait::async_trait;
use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::{
    audit::{AuditContext, Audited},
    entity,
    models::Product,
    repository::{Change, ChangeSet, ProductRepository, RepositoryError, RepositoryResult, Tracking},
};

/// PostgreSQL implementation of [`ProductRepository`].
///
/// Name uniqueness and the quantity floor are backed by the schema
/// (`ux_products_name_lower`, `ck_products_quantity_non_negative`); violations
/// surface as [`RepositoryError::UniqueViolation`] / [`RepositoryError::CheckViolation`].
#[derive(Clone)]
pub struct PgProductRepository {
    db: DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn apply(
        &self,
        changes: ChangeSet,
        audit: &AuditContext,
    ) -> RepositoryResult<Vec<Audited<Product>>> {
        let txn = self.db.begin().await?;
        let now: DateTimeWithTimeZone = Utc::now().fixed_offset();
        let mut persisted = Vec::with_capacity(changes.len());

        for change in changes {
            match change {
                Change::Added(product) => {
                    let model = entity::ActiveModel {
                        id: Set(product.id()),
                        name: Set(product.name().to_string()),
                        description: Set(product.description().to_string()),
                        quantity: Set(product.quantity()),
                        created_by: Set(audit.user().to_string()),
                        created: Set(now),
                        last_modified_by: Set(None),
                        last_modified: Set(None),
                    }
                    .insert(&txn)
                    .await?;
                    persisted.push(model.into());
                }
                Change::Modified(product) => {
                    // created / created_by stay NotSet so they are never rewritten.
                    let model = entity::ActiveModel {
                        id: Unchanged(product.id()),
                        name: Set(product.name().to_string()),
                        description: Set(product.description().to_string()),
                        quantity: Set(product.quantity()),
                        created_by: NotSet,
                        created: NotSet,
                        last_modified_by: Set(Some(audit.user().to_string())),
                        last_modified: Set(Some(now)),
                    }
                    .update(&txn)
                    .await?;
                    persisted.push(model.into());
                }
                Change::Removed(product) => {
                    entity::Entity::delete_by_id(product.id()).exec(&txn).await?;
                }
            }
        }

        txn.commit().await?;
        Ok(persisted)
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn find_all(&self, tracking: Tracking) -> RepositoryResult<Vec<Audited<Product>>> {
        tracing::trace!(?tracking, "Loading all products");
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Created)
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn find_by_id(
        &self,
        id: Uuid,
        tracking: Tracking,
    ) -> RepositoryResult<Option<Audited<Product>>> {
        tracing::trace!(%id, ?tracking, "Loading product");
        let model = entity::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(Into::into))
    }

    async fn exists_by_name(&self, name: &str, excluding: Option<Uuid>) -> RepositoryResult<bool> {
        let mut query = entity::Entity::find()
            .filter(Expr::cust_with_values("LOWER(name) = LOWER($1)", [name.trim()]));

        if let Some(id) = excluding {
            query = query.filter(entity::Column::Id.ne(id));
        }

        Ok(query.one(&self.db).await?.is_some())
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
        if changes.is_empty() {
            return Ok(Vec::new());
        }

        // Dropping `apply` mid-flight drops the open transaction, which rolls back.
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(RepositoryError::Cancelled),
            result = self.apply(changes, audit) => result,
        }
    }
}
