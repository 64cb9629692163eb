//! Machine-readable error codes carried in every error response.
//!
//! ```rust
//! use axum_helpers::errors::ErrorCode;
//!
//! let code = ErrorCode::ValidationError;
//! assert_eq!(code.as_str(), "VALIDATION_ERROR");
//! assert_eq!(code.code(), 1001);
//! ```

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Error codes exposed to clients in the `code` field.
///
/// The string form is what clients match on; the integer form is only used
/// in structured logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Client errors (1000-1099)
    /// One or more body fields failed validation
    ValidationError,

    /// Path parameter is not a valid UUID
    InvalidUuid,

    /// Request body is not valid JSON for the endpoint
    InvalidJson,

    /// Requested resource was not found
    NotFound,

    /// A query parameter or body value is malformed
    InvalidInput,

    /// Not enough stock to satisfy a reduction
    InsufficientStock,

    MethodNotAllowed,

    // Server errors (1100-1199)
    InternalError,
    ServiceUnavailable,

    // Database errors (2000-2099)
    DatabaseError,

    /// No pooled connection could be acquired
    DatabaseUnavailable,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::InvalidUuid => "INVALID_UUID",
            Self::InvalidJson => "INVALID_JSON",
            Self::NotFound => "NOT_FOUND",
            Self::InvalidInput => "INVALID_INPUT",
            Self::InsufficientStock => "INSUFFICIENT_STOCK",
            Self::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            Self::InternalError => "INTERNAL_ERROR",
            Self::ServiceUnavailable => "SERVICE_UNAVAILABLE",
            Self::DatabaseError => "DATABASE_ERROR",
            Self::DatabaseUnavailable => "DATABASE_UNAVAILABLE",
        }
    }

    /// Integer code for logs and dashboards.
    ///
    /// - 1000-1099: client errors
    /// - 1100-1199: server errors
    /// - 2000-2099: database errors
    pub fn code(&self) -> i32 {
        match self {
            Self::ValidationError => 1001,
            Self::InvalidUuid => 1002,
            Self::InvalidJson => 1003,
            Self::NotFound => 1004,
            Self::InvalidInput => 1005,
            Self::InsufficientStock => 1006,
            Self::MethodNotAllowed => 1007,

            Self::InternalError => 1101,
            Self::ServiceUnavailable => 1102,

            Self::DatabaseError => 2001,
            Self::DatabaseUnavailable => 2002,
        }
    }

    pub fn default_message(&self) -> &'static str {
        match self {
            Self::ValidationError => "Request validation failed",
            Self::InvalidUuid => "Invalid UUID format",
            Self::InvalidJson => "Invalid JSON body",
            Self::NotFound => "Resource not found",
            Self::InvalidInput => "Invalid input",
            Self::InsufficientStock => "Insufficient stock",
            Self::MethodNotAllowed => "The HTTP method is not allowed for this resource",
            Self::InternalError => "An internal server error occurred",
            Self::ServiceUnavailable => "Service is temporarily unavailable",
            Self::DatabaseError => "A database error occurred",
            Self::DatabaseUnavailable => "Database is temporarily unavailable",
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
