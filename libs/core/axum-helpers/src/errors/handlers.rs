use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use super::{ErrorCode, ErrorResponse};

/// Router fallback for unknown paths.
pub async fn not_found() -> Response {
    let body = Json(ErrorResponse::new(
        "The requested resource was not found",
        ErrorCode::NotFound,
    ));

    (StatusCode::NOT_FOUND, body).into_response()
}

pub async fn method_not_allowed() -> Response {
    let body = Json(ErrorResponse::new(
        ErrorCode::MethodNotAllowed.default_message(),
        ErrorCode::MethodNotAllowed,
    ));

    (StatusCode::METHOD_NOT_ALLOWED, body).into_response()
}
