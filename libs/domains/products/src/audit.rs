//! Who changed a product and when.
//!
//! The acting user travels explicitly from the HTTP boundary into the
//! repository's commit; timestamps are stamped there, never by the entity.

use axum::{extract::FromRequestParts, http::request::Parts};
use chrono::{DateTime, Utc};
use std::convert::Infallible;
use std::ops::Deref;

/// Request header carrying the acting user's name.
pub const USER_HEADER: &str = "x-user-name";

/// User recorded when the request does not name one.
pub const DEFAULT_USER: &str = "System";

/// Matches the width of the `created_by` / `last_modified_by` columns.
pub const USER_MAX_LENGTH: usize = 256;

/// Acting user for a unit of work.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditContext {
    user: String,
}

impl AuditContext {
    /// Blank names fall back to [`DEFAULT_USER`]; long names are truncated.
    pub fn new(user: impl AsRef<str>) -> Self {
        let user = user.as_ref().trim();
        if user.is_empty() {
            return Self::default();
        }
        Self {
            user: user.chars().take(USER_MAX_LENGTH).collect(),
        }
    }

    pub fn user(&self) -> &str {
        &self.user
    }
}

impl Default for AuditContext {
    fn default() -> Self {
        Self {
            user: DEFAULT_USER.to_string(),
        }
    }
}

impl<S> FromRequestParts<S> for AuditContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(AuditContext::new)
            .unwrap_or_default())
    }
}

/// Audit columns of a persisted row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditInfo {
    pub created: DateTime<Utc>,
    pub created_by: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub last_modified_by: Option<String>,
}

/// An entity together with its audit columns, as loaded from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Audited<T> {
    entity: T,
    audit: AuditInfo,
}

impl<T> Audited<T> {
    pub fn new(entity: T, audit: AuditInfo) -> Self {
        Self { entity, audit }
    }

    pub fn audit(&self) -> &AuditInfo {
        &self.audit
    }

    pub fn into_entity(self) -> T {
        self.entity
    }
}

impl<T> Deref for Audited<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    async fn extract(request: Request<()>) -> AuditContext {
        let (mut parts, _) = request.into_parts();
        match AuditContext::from_request_parts(&mut parts, &()).await {
            Ok(ctx) => ctx,
            Err(never) => match never {},
        }
    }

    #[test]
    fn test_blank_user_defaults_to_system() {
        assert_eq!(AuditContext::new("  ").user(), "System");
        assert_eq!(AuditContext::default().user(), "System");
    }

    #[test]
    fn test_long_user_is_truncated() {
        let ctx = AuditContext::new("u".repeat(300));
        assert_eq!(ctx.user().chars().count(), USER_MAX_LENGTH);
    }

    #[tokio::test]
    async fn test_extracts_user_from_header() {
        let request = Request::builder()
            .header(USER_HEADER, " alice ")
            .body(())
            .unwrap();
        assert_eq!(extract(request).await.user(), "alice");
    }

    #[tokio::test]
    async fn test_missing_header_defaults_to_system() {
        let request = Request::builder().body(()).unwrap();
        assert_eq!(extract(request).await.user(), "System");
    }
}
