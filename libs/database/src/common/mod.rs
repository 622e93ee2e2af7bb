//! Error and retry helpers shared by the connectors

pub mod error;
pub mod retry;

pub use error::DatabaseError;
pub use retry::{retry_with_backoff, RetryConfig};
