pub mod codes;
pub mod handlers;

pub use codes::ErrorCode;

use crate::response::{ApiResponse, ResponseStatus};
use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Errors that reach the HTTP boundary.
///
/// Every variant renders as an [`ApiResponse`] with no payload. Internal
/// failures are logged with full detail while the client only receives the
/// generic message.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Bad Request: {0}")]
    BadRequest(String),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),
}

impl AppError {
    pub fn status(&self) -> ResponseStatus {
        match self {
            Self::JsonExtractorRejection(_) | Self::InvalidUuid(_) | Self::BadRequest(_) => {
                ResponseStatus::BadRequest
            }
            Self::InternalServerError(_) => ResponseStatus::Error,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let message = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::warn!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                format!("{} {}", ErrorCode::InvalidJson.default_message(), e.body_text())
            }
            AppError::InvalidUuid(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidUuid.code(), id = %raw, "Invalid UUID");
                ErrorCode::InvalidUuid.default_message().to_string()
            }
            AppError::BadRequest(msg) => {
                tracing::info!(error_code = ErrorCode::ValidationError.code(), "Bad request: {}", msg);
                msg
            }
            AppError::InternalServerError(detail) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    detail
                );
                ErrorCode::InternalError.default_message().to_string()
            }
        };

        ApiResponse::<()>::failure(status, message).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use http_body_util::BodyExt;
    use serde_json::Value;

    async fn render(err: AppError) -> (StatusCode, Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let (status, body) =
            render(AppError::InternalServerError("relation \"products\" does not exist".into()))
                .await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["status"], "Error");
        assert_eq!(body["message"], "An unexpected error occurred.");
        assert!(body["data"].is_null());
    }

    #[tokio::test]
    async fn test_bad_request_keeps_message() {
        let (status, body) = render(AppError::BadRequest("missing id".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "BadRequest");
        assert_eq!(body["message"], "missing id");
    }

    #[tokio::test]
    async fn test_invalid_uuid_is_bad_request() {
        let (status, body) = render(AppError::InvalidUuid("abc".into())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Invalid UUID format.");
    }
}
