//! Products Domain
//!
//! Product catalogue backed by PostgreSQL (sea-orm) or an in-memory store.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │  Handlers   │  ← HTTP endpoints, audit user, request cancellation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Service   │  ← Checks, validation, one commit per call
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Repository  │  ← Named queries + unit-of-work commit (Postgres / in-memory)
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │   Models    │  ← Product entity, DTOs
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use domain_products::{handlers, PgProductRepository, ProductService};
//! use sea_orm::Database;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let db = Database::connect("postgres://localhost/shop").await?;
//!
//! let service = ProductService::new(PgProductRepository::new(db));
//! let router = handlers::router(service);
//! # Ok(())
//! # }
//! ```

pub mod audit;
pub mod entity;
pub mod error;
pub mod handlers;
pub mod messages;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod service;

// Re-export commonly used types
pub use audit::{AuditContext, AuditInfo, Audited};
pub use error::{ProductError, ProductResult};
pub use handlers::ApiDoc;
pub use models::{
    CreateProductRequest, Product, ProductResponse, UpdateProductRequest, ValidationError,
};
pub use postgres::PgProductRepository;
pub use repository::{
    ChangeSet, InMemoryProductRepository, ProductRepository, RepositoryError, Tracking,
};
pub use service::ProductService;
