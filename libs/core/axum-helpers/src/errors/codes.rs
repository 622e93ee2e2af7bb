//! Integer error codes attached to boundary log events.
//!
//! Clients only see the envelope; the code is for correlating log lines.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! assert_eq!(ErrorCode::InvalidUuid.code(), 1002);
//! assert_eq!(ErrorCode::InvalidUuid.as_str(), "INVALID_UUID");
//! ```

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Client errors (1000s)
    ValidationError,
    InvalidUuid,
    InvalidJson,
    RouteNotFound,

    // Server errors (5000s)
    InternalError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidJson => "INVALID_JSON",
            Self::RouteNotFound => "ROUTE_NOT_FOUND",
            Self::InternalError => "INTERNAL_ERROR",
        }
    }

    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidJson => 1003,
            Self::RouteNotFound => 1006,
            Self::InternalError => 5000,
        }
    }

    /// Message used when the caller has nothing more specific to say.
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Validation failed for the provided input.",
            Self::InvalidUuid => "Invalid UUID format.",
            Self::InvalidJson => "Invalid JSON format.",
            Self::RouteNotFound => "The requested route does not exist.",
            Self::InternalError => "An unexpected error occurred.",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let all = [
            ErrorCode::ValidationError,
            ErrorCode::InvalidUuid,
            ErrorCode::InvalidJson,
            ErrorCode::RouteNotFound,
            ErrorCode::InternalError,
        ];
        let codes: std::collections::HashSet<i32> = all.iter().map(ErrorCode::code).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_internal_error_message_is_generic() {
        assert_eq!(
            ErrorCode::InternalError.default_message(),
            "An unexpected error occurred."
        );
    }
}
