use axum::response::{IntoResponse, Response};
use axum_helpers::AppError;
use thiserror::Error;
use uuid::Uuid;

use crate::repository::RepositoryError;

/// Failures the product service cannot express as an envelope outcome.
#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Storage error: {0}")]
    Storage(RepositoryError),

    #[error("Operation cancelled")]
    Cancelled,

    #[error("Commit returned no row for product {0}")]
    MissingRecord(Uuid),
}

pub type ProductResult<T> = Result<T, ProductError>;

impl From<RepositoryError> for ProductError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Cancelled => ProductError::Cancelled,
            other => ProductError::Storage(other),
        }
    }
}

/// Every service failure is unexpected from the client's point of view.
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        AppError::InternalServerError(err.to_string())
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cancelled_repository_error_is_lifted() {
        let err: ProductError = RepositoryError::Cancelled.into();
        assert!(matches!(err, ProductError::Cancelled));

        let err: ProductError = RepositoryError::Database("boom".into()).into();
        assert!(matches!(err, ProductError::Storage(_)));
        assert!(err.to_string().contains("boom"));
    }
}
