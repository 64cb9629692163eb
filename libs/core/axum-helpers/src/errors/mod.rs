pub mod codes;
pub mod handlers;
pub mod responses;

pub use codes::ErrorCode;

use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use sea_orm::DbErr;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use utoipa::ToSchema;
use validator::ValidationErrors;

/// Body of every error response.
///
/// ```json
/// {
///   "error": "Insufficient stock: 3 available, 5 requested",
///   "code": "INSUFFICIENT_STOCK",
///   "details": { "available": 3, "requested": 5 }
/// }
/// ```
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable message
    pub error: String,
    /// Machine-readable code for programmatic handling
    pub code: ErrorCode,
    /// Structured details, e.g. validation errors keyed by field name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            error: error.into(),
            code,
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// Application error type that can be converted to HTTP responses.
///
/// Domain errors convert into this type so every endpoint shares one
/// envelope and one logging policy: client errors are logged at `info`,
/// server errors at `error` with the underlying cause, which is never sent
/// to the client.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppError {
    #[error("JSON extraction error: {0}")]
    JsonExtractorRejection(#[from] JsonRejection),

    #[error("Validation error: {0}")]
    ValidationError(#[from] ValidationErrors),

    #[error("Invalid UUID: {0}")]
    InvalidUuid(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A 400 carrying a specific code and optional structured details.
    #[error("Bad request ({code}): {message}")]
    BadRequest {
        code: ErrorCode,
        message: String,
        details: Option<Value>,
    },

    #[error("Not Found: {0}")]
    NotFound(String),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Internal Server Error: {0}")]
    InternalServerError(String),

    #[error("Service Unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AppError {
    pub fn bad_request(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::BadRequest {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::JsonExtractorRejection(_)
            | AppError::ValidationError(_)
            | AppError::InvalidUuid(_)
            | AppError::InvalidInput(_)
            | AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(e) => map_db_error(e).0,
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            AppError::JsonExtractorRejection(e) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidJson.code(),
                    "JSON extraction error: {}",
                    e.body_text()
                );
                ErrorResponse::new(e.body_text(), ErrorCode::InvalidJson)
            }
            AppError::ValidationError(e) => {
                tracing::info!(
                    error_code = ErrorCode::ValidationError.code(),
                    "Validation error: {}",
                    e
                );
                ErrorResponse::new(validation_summary(&e), ErrorCode::ValidationError)
                    .with_details(validation_details(&e))
            }
            AppError::InvalidUuid(raw) => {
                tracing::info!(error_code = ErrorCode::InvalidUuid.code(), "Invalid UUID: {}", raw);
                ErrorResponse::new(format!("Invalid UUID: {raw}"), ErrorCode::InvalidUuid)
            }
            AppError::InvalidInput(msg) => {
                tracing::info!(
                    error_code = ErrorCode::InvalidInput.code(),
                    "Invalid input: {}",
                    msg
                );
                ErrorResponse::new(msg, ErrorCode::InvalidInput)
            }
            AppError::BadRequest {
                code,
                message,
                details,
            } => {
                tracing::info!(error_code = code.code(), "Bad request: {}", message);
                ErrorResponse {
                    error: message,
                    code,
                    details,
                }
            }
            AppError::NotFound(msg) => {
                tracing::info!(error_code = ErrorCode::NotFound.code(), "Not found: {}", msg);
                ErrorResponse::new(msg, ErrorCode::NotFound)
            }
            AppError::Database(e) => {
                let (_, code) = map_db_error(&e);
                tracing::error!(error_code = code.code(), "Database error: {:?}", e);
                ErrorResponse::new(code.default_message(), code)
            }
            AppError::InternalServerError(msg) => {
                tracing::error!(
                    error_code = ErrorCode::InternalError.code(),
                    "Internal server error: {}",
                    msg
                );
                ErrorResponse::new(
                    ErrorCode::InternalError.default_message(),
                    ErrorCode::InternalError,
                )
            }
            AppError::ServiceUnavailable(msg) => {
                tracing::warn!(
                    error_code = ErrorCode::ServiceUnavailable.code(),
                    "Service unavailable: {}",
                    msg
                );
                ErrorResponse::new(
                    ErrorCode::ServiceUnavailable.default_message(),
                    ErrorCode::ServiceUnavailable,
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Maps a SeaORM error to a status and code.
fn map_db_error(error: &DbErr) -> (StatusCode, ErrorCode) {
    match error {
        DbErr::ConnectionAcquire(_) => {
            (StatusCode::SERVICE_UNAVAILABLE, ErrorCode::DatabaseUnavailable)
        }
        DbErr::RecordNotFound(_) | DbErr::RecordNotUpdated => {
            (StatusCode::NOT_FOUND, ErrorCode::NotFound)
        }
        _ => (StatusCode::INTERNAL_SERVER_ERROR, ErrorCode::DatabaseError),
    }
}

/// `"Invalid fields: a, b"` with field names sorted for stable output.
fn validation_summary(errors: &ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .keys()
        .map(|field| field.to_string())
        .collect();
    fields.sort();

    if fields.is_empty() {
        ErrorCode::ValidationError.default_message().to_string()
    } else {
        format!("Invalid fields: {}", fields.join(", "))
    }
}

/// Field errors as `{ field: [{ code, message, params }] }`.
pub fn validation_details(errors: &ValidationErrors) -> Value {
    let details = errors
        .field_errors()
        .iter()
        .map(|(field, errors)| {
            let entries: Vec<Value> = errors
                .iter()
                .map(|err| {
                    serde_json::json!({
                        "code": err.code,
                        "message": err.message,
                        "params": err.params,
                    })
                })
                .collect();
            (field.to_string(), Value::Array(entries))
        })
        .collect::<serde_json::Map<_, _>>();

    Value::Object(details)
}

#[cfg(test)]
mod tests {
    use super::*;
    use http_body_util::BodyExt;
    use validator::ValidationError;

    async fn render(error: AppError) -> (StatusCode, ErrorResponse) {
        let response = error.into_response();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_validation_error_lists_fields_and_details() {
        let mut errors = ValidationErrors::new();
        let mut name = ValidationError::new("length");
        name.message = Some("name must not be empty".into());
        errors.add("name", name);
        errors.add("brand", ValidationError::new("length"));

        let (status, body) = render(AppError::ValidationError(errors)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::ValidationError);
        assert_eq!(body.error, "Invalid fields: brand, name");
        let details = body.details.unwrap();
        assert_eq!(details["name"][0]["message"], "name must not be empty");
        assert_eq!(details["brand"][0]["code"], "length");
    }

    #[tokio::test]
    async fn test_bad_request_keeps_code_and_details() {
        let error = AppError::BadRequest {
            code: ErrorCode::InsufficientStock,
            message: "Insufficient stock: 3 available, 5 requested".into(),
            details: Some(serde_json::json!({"available": 3, "requested": 5})),
        };

        let (status, body) = render(error).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::InsufficientStock);
        assert_eq!(body.details.unwrap()["available"], 3);
    }

    #[tokio::test]
    async fn test_internal_errors_do_not_leak_cause() {
        let (status, body) =
            render(AppError::InternalServerError("password=hunter2".into())).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, ErrorCode::InternalError);
        assert!(!body.error.contains("hunter2"));

        let (status, body) =
            render(AppError::Database(DbErr::Custom("relation missing".into()))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.code, ErrorCode::DatabaseError);
        assert!(!body.error.contains("relation"));
    }

    #[tokio::test]
    async fn test_not_found_and_invalid_input() {
        let (status, body) = render(AppError::NotFound("Product x not found".into())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Product x not found");
        assert!(body.details.is_none());

        let error = AppError::InvalidInput("limit must be an integer".into());
        let (status, body) = render(error).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, ErrorCode::InvalidInput);
    }

    #[test]
    fn test_details_omitted_when_absent() {
        let json = serde_json::to_value(ErrorResponse::new("gone", ErrorCode::NotFound)).unwrap();
        assert_eq!(json, serde_json::json!({"error": "gone", "code": "NOT_FOUND"}));
    }
}
