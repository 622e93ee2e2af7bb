//! Uniform outcome envelope returned by every API operation.
//!
//! ```json
//! { "data": { "id": "…" }, "message": "Product was successfully created.", "status": "Created" }
//! ```

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Outcome category of an operation. The HTTP status is derived from it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema, strum::Display,
)]
pub enum ResponseStatus {
    Success,
    Created,
    Updated,
    NotFound,
    BadRequest,
    Conflict,
    Error,
}

impl ResponseStatus {
    pub fn status_code(self) -> StatusCode {
        match self {
            Self::Success | Self::Updated => StatusCode::OK,
            Self::Created => StatusCode::CREATED,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Conflict => StatusCode::CONFLICT,
            Self::Error => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub data: Option<T>,
    pub message: Option<String>,
    pub status: ResponseStatus,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            message: None,
            status: ResponseStatus::Success,
        }
    }

    /// `Success` with a message and no payload.
    pub fn success_message(message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
            status: ResponseStatus::Success,
        }
    }

    pub fn created(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            status: ResponseStatus::Created,
        }
    }

    pub fn updated(data: T, message: impl Into<String>) -> Self {
        Self {
            data: Some(data),
            message: Some(message.into()),
            status: ResponseStatus::Updated,
        }
    }

    /// Payload-free envelope carrying only a status and message.
    pub fn failure(status: ResponseStatus, message: impl Into<String>) -> Self {
        Self {
            data: None,
            message: Some(message.into()),
            status,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::failure(ResponseStatus::NotFound, message)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::failure(ResponseStatus::BadRequest, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::failure(ResponseStatus::Conflict, message)
    }

    /// Re-types a payload-free envelope.
    pub fn cast<U>(self) -> ApiResponse<U> {
        ApiResponse {
            data: None,
            message: self.message,
            status: self.status,
        }
    }
}

/// Payload-free envelope, as documented in the OpenAPI schema.
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    #[schema(value_type = Option<Object>)]
    pub data: Option<serde_json::Value>,
    #[schema(example = "Product with that id was not found.")]
    pub message: Option<String>,
    pub status: ResponseStatus,
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status.status_code(), Json(self)).into_response()
    }
}
