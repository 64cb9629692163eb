use axum::response::{IntoResponse, Response};
use axum_helpers::{AppError, ErrorCode};
use sea_orm::DbErr;
use thiserror::Error;
use uuid::Uuid;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ProductError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Product not found: {0}")]
    NotFound(Uuid),

    #[error("Insufficient stock: {available} available, {requested} requested")]
    InsufficientStock { available: i32, requested: i64 },

    #[error("Database error: {0}")]
    Database(String),
}

pub type ProductResult<T> = Result<T, ProductError>;

/// Convert ProductError to AppError for standardized error responses
impl From<ProductError> for AppError {
    fn from(err: ProductError) -> Self {
        match err {
            ProductError::Validation(errors) => AppError::ValidationError(errors),
            ProductError::InvalidInput(msg) => AppError::InvalidInput(msg),
            ProductError::NotFound(id) => AppError::NotFound(format!("Product {} not found", id)),
            ProductError::InsufficientStock {
                available,
                requested,
            } => AppError::BadRequest {
                code: ErrorCode::InsufficientStock,
                message: format!(
                    "Insufficient stock: {} available, {} requested",
                    available, requested
                ),
                details: Some(serde_json::json!({
                    "available": available,
                    "requested": requested,
                })),
            },
            ProductError::Database(msg) => AppError::InternalServerError(msg),
        }
    }
}

impl IntoResponse for ProductError {
    fn into_response(self) -> Response {
        let app_error: AppError = self.into();
        app_error.into_response()
    }
}

impl From<DbErr> for ProductError {
    fn from(err: DbErr) -> Self {
        ProductError::Database(err.to_string())
    }
}
