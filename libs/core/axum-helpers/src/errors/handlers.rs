use axum::response::{IntoResponse, Response};

use super::ErrorCode;
use crate::response::ApiResponse;

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    ApiResponse::<()>::not_found(ErrorCode::RouteNotFound.default_message()).into_response()
}
