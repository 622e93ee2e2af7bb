//! Product Service - orchestrates lookups, validation and commits

use axum_helpers::ApiResponse;
use std::future::Future;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, instrument, warn};
use uuid::Uuid;

use crate::audit::{AuditContext, Audited};
use crate::error::{ProductError, ProductResult};
use crate::messages::{
    PRODUCT_CREATED, PRODUCT_DELETED, PRODUCT_EXISTS, PRODUCT_NOT_FOUND, PRODUCT_UPDATED,
    QUANTITY_NEGATIVE,
};
use crate::models::{CreateProductRequest, Product, ProductResponse, UpdateProductRequest};
use crate::repository::{
    ChangeSet, NAME_UNIQUE_CONSTRAINT, ProductRepository, QUANTITY_CHECK_CONSTRAINT,
    RepositoryError, RepositoryResult, Tracking,
};

enum CommitOutcome {
    Saved(Vec<Audited<Product>>),
    /// A storage constraint rejected the changes; carries the client envelope.
    Rejected(ApiResponse<()>),
}

/// Product service
///
/// Each operation runs checks, then validation, then at most one commit.
/// Expected outcomes (not found, conflict, invalid input) are returned as
/// envelopes; only unexpected storage failures and cancellation are errors.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Runs a storage query unless `cancel` fires first.
    async fn query<T>(
        cancel: &CancellationToken,
        fut: impl Future<Output = RepositoryResult<T>>,
    ) -> ProductResult<T> {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ProductError::Cancelled),
            result = fut => result.map_err(Into::into),
        }
    }

    async fn commit(
        &self,
        changes: ChangeSet,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> ProductResult<CommitOutcome> {
        match self.repository.commit(changes, audit, cancel).await {
            Ok(saved) => Ok(CommitOutcome::Saved(saved)),
            Err(RepositoryError::UniqueViolation { constraint })
                if constraint == NAME_UNIQUE_CONSTRAINT =>
            {
                warn!(%constraint, "Product name taken concurrently");
                Ok(CommitOutcome::Rejected(ApiResponse::conflict(PRODUCT_EXISTS)))
            }
            Err(RepositoryError::CheckViolation { constraint })
                if constraint == QUANTITY_CHECK_CONSTRAINT =>
            {
                warn!(%constraint, "Quantity rejected by storage");
                Ok(CommitOutcome::Rejected(ApiResponse::bad_request(
                    QUANTITY_NEGATIVE,
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn single(saved: Vec<Audited<Product>>, id: Uuid) -> ProductResult<ProductResponse> {
        saved
            .iter()
            .find(|p| p.id() == id)
            .map(ProductResponse::from)
            .ok_or(ProductError::MissingRecord(id))
    }

    /// List all products
    #[instrument(skip(self, cancel))]
    pub async fn list_products(
        &self,
        cancel: &CancellationToken,
    ) -> ProductResult<ApiResponse<Vec<ProductResponse>>> {
        let products = Self::query(cancel, self.repository.find_all(Tracking::ReadOnly)).await?;
        Ok(ApiResponse::success(
            products.iter().map(ProductResponse::from).collect(),
        ))
    }

    /// Get a product by ID
    #[instrument(skip(self, cancel))]
    pub async fn get_product(
        &self,
        id: Uuid,
        cancel: &CancellationToken,
    ) -> ProductResult<ApiResponse<ProductResponse>> {
        let found = Self::query(cancel, self.repository.find_by_id(id, Tracking::ReadOnly)).await?;

        Ok(match found {
            Some(product) => ApiResponse::success(ProductResponse::from(&product)),
            None => ApiResponse::not_found(PRODUCT_NOT_FOUND),
        })
    }

    /// Create a new product
    #[instrument(skip(self, request, audit, cancel), fields(product_name = %request.name.trim()))]
    pub async fn create_product(
        &self,
        request: CreateProductRequest,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> ProductResult<ApiResponse<ProductResponse>> {
        let name_taken = Self::query(
            cancel,
            self.repository.exists_by_name(request.name.trim(), None),
        )
        .await?;
        if name_taken {
            return Ok(ApiResponse::conflict(PRODUCT_EXISTS));
        }

        let product = match Product::create(&request.name, &request.description, request.quantity)
        {
            Ok(product) => product,
            Err(e) => return Ok(ApiResponse::bad_request(e.message())),
        };
        let id = product.id();

        let mut changes = ChangeSet::new();
        changes.add(product);

        match self.commit(changes, audit, cancel).await? {
            CommitOutcome::Saved(saved) => {
                let response = Self::single(saved, id)?;
                info!(product_id = %id, user = audit.user(), "Created product");
                Ok(ApiResponse::created(response, PRODUCT_CREATED))
            }
            CommitOutcome::Rejected(rejection) => Ok(rejection.cast()),
        }
    }

    /// Replace a product's name, description and quantity
    #[instrument(skip(self, request, audit, cancel))]
    pub async fn update_product(
        &self,
        id: Uuid,
        request: UpdateProductRequest,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> ProductResult<ApiResponse<ProductResponse>> {
        let found = Self::query(cancel, self.repository.find_by_id(id, Tracking::ForUpdate)).await?;
        let Some(stored) = found else {
            return Ok(ApiResponse::not_found(PRODUCT_NOT_FOUND));
        };

        let name_taken = Self::query(
            cancel,
            self.repository.exists_by_name(request.name.trim(), Some(id)),
        )
        .await?;
        if name_taken {
            return Ok(ApiResponse::conflict(PRODUCT_EXISTS));
        }

        let mut product = stored.into_entity();
        if let Err(e) = product.update(&request.name, &request.description, request.quantity) {
            return Ok(ApiResponse::bad_request(e.message()));
        }

        let mut changes = ChangeSet::new();
        changes.update(product);

        match self.commit(changes, audit, cancel).await? {
            CommitOutcome::Saved(saved) => {
                let response = Self::single(saved, id)?;
                info!(product_id = %id, user = audit.user(), "Updated product");
                Ok(ApiResponse::updated(response, PRODUCT_UPDATED))
            }
            CommitOutcome::Rejected(rejection) => Ok(rejection.cast()),
        }
    }

    /// Delete a product
    #[instrument(skip(self, audit, cancel))]
    pub async fn delete_product(
        &self,
        id: Uuid,
        audit: &AuditContext,
        cancel: &CancellationToken,
    ) -> ProductResult<ApiResponse<()>> {
        let found = Self::query(cancel, self.repository.find_by_id(id, Tracking::ForUpdate)).await?;
        let Some(stored) = found else {
            return Ok(ApiResponse::not_found(PRODUCT_NOT_FOUND));
        };

        let mut changes = ChangeSet::new();
        changes.remove(stored.into_entity());

        match self.commit(changes, audit, cancel).await? {
            CommitOutcome::Saved(_) => {
                info!(product_id = %id, user = audit.user(), "Deleted product");
                Ok(ApiResponse::success_message(PRODUCT_DELETED))
            }
            CommitOutcome::Rejected(rejection) => Ok(rejection),
        }
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}
