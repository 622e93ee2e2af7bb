//! # Axum Helpers
//!
//! Shared HTTP plumbing for the shop services.
//!
//! ## Modules
//!
//! - **[`response`]**: The `ApiResponse` envelope and its status taxonomy
//! - **[`errors`]**: Boundary errors rendered as envelopes
//! - **[`extractors`]**: UUID path and JSON body extractors with envelope rejections
//! - **[`server`]**: Router setup, health checks, graceful shutdown
//!
//! ## Quick Start
//!
//! ```ignore
//! use axum::Router;
//! use axum_helpers::server::{create_production_app, create_router};
//! use core_config::server::ServerConfig;
//! use std::time::Duration;
//! use utoipa::OpenApi;
//!
//! #[derive(OpenApi)]
//! #[openapi(paths())]
//! struct ApiDoc;
//!
//! #[tokio::main]
//! async fn main() -> std::io::Result<()> {
//!     let config = ServerConfig::default();
//!     let router = create_router::<ApiDoc>(Router::new(), &config)?;
//!     create_production_app(router, &config, Duration::from_secs(30), async {}).await
//! }
//! ```

pub mod errors;
pub mod extractors;
pub mod response;
pub mod server;

pub use errors::{AppError, ErrorCode};
pub use extractors::{JsonBody, UuidPath};
pub use response::{ApiResponse, MessageResponse, ResponseStatus};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
