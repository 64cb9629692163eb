//! Reusable OpenAPI response types for consistent API documentation.

use super::ErrorResponse;
#[allow(unused_imports)]
use serde_json::json;
use utoipa::ToResponse;

#[derive(ToResponse)]
#[response(
    description = "Internal Server Error",
    content_type = "application/json",
    example = json!({
        "error": "An internal server error occurred",
        "code": "INTERNAL_ERROR"
    })
)]
pub struct InternalServerErrorResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - validation, malformed input or insufficient stock",
    content_type = "application/json",
    example = json!({
        "error": "Invalid fields: name, price",
        "code": "VALIDATION_ERROR",
        "details": {
            "name": [{
                "code": "length",
                "message": "name must not be empty",
                "params": {"min": 1, "max": 200, "value": ""}
            }],
            "price": [{
                "code": "price_positive",
                "message": "price must be greater than 0",
                "params": {"value": "0"}
            }]
        }
    })
)]
pub struct BadRequestResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Bad Request - Invalid UUID",
    content_type = "application/json",
    example = json!({
        "error": "Invalid UUID: not-a-uuid",
        "code": "INVALID_UUID"
    })
)]
pub struct BadRequestUuidResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Resource not found",
    content_type = "application/json",
    example = json!({
        "error": "Product 0199f3c4-7a5e-7c1b-9a2d-3f4e5d6c7b8a not found",
        "code": "NOT_FOUND"
    })
)]
pub struct NotFoundResponse(pub ErrorResponse);

#[derive(ToResponse)]
#[response(
    description = "Service Unavailable",
    content_type = "application/json",
    example = json!({
        "error": "Service is temporarily unavailable",
        "code": "SERVICE_UNAVAILABLE"
    })
)]
pub struct ServiceUnavailableResponse(pub ErrorResponse);
