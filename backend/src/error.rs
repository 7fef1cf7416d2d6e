//! Application error handling
//!
//! Converts internal errors to HTTP responses of the form
//! `{"error": {"code", "message", "field"?}}`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use fitness_tracker_shared::{validation::ValidationError, AuthError, ErrorDetail, ErrorResponse};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Validation error: {}", .0.user_message())]
    InvalidField(ValidationError),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),

    #[error("Database error")]
    Database(#[from] sqlx::Error),

    #[error("Bad request: {0}")]
    BadRequest(String),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::InvalidField(err)
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        ApiError::Unauthorized(err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let mut field = None;
        let (status, code, message) = match &self {
            ApiError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            ApiError::InvalidField(err) => {
                field = Some(err.field.clone());
                (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", err.user_message())
            }
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            ApiError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            ApiError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
            ApiError::Database(err) => {
                error!("Database error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "DATABASE_ERROR",
                    "A database error occurred".to_string(),
                )
            }
        };

        let body = Json(ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message,
                field,
            },
        });

        (status, body).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let response = ApiError::Validation("Invalid input".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_field_error_status() {
        let err: ApiError = ValidationError::new("age", "Age must be at least 13").into();
        assert_eq!(err.to_string(), "Validation error: Age: Age must be at least 13");
        assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
    }

    #[rstest::rstest]
    #[case(AuthError::InvalidCredentials, "Invalid credentials")]
    #[case(AuthError::TokenExpired, "Token expired")]
    #[case(AuthError::InvalidToken, "Invalid token")]
    #[case(AuthError::MissingToken, "Missing token")]
    fn test_auth_error_maps_to_unauthorized(#[case] err: AuthError, #[case] message: &str) {
        let err: ApiError = err.into();
        assert_eq!(err.to_string(), format!("Unauthorized: {}", message));
        assert_eq!(err.into_response().status(), StatusCode::UNAUTHORIZED);
    }

    #[rstest::rstest]
    #[case(ApiError::NotFound("User not found".into()), StatusCode::NOT_FOUND)]
    #[case(ApiError::Conflict("Email already registered".into()), StatusCode::CONFLICT)]
    #[case(ApiError::Forbidden("nope".into()), StatusCode::FORBIDDEN)]
    #[case(ApiError::BadRequest("No progress fields provided".into()), StatusCode::BAD_REQUEST)]
    #[case(ApiError::Unauthorized("Invalid credentials".into()), StatusCode::UNAUTHORIZED)]
    fn test_status_mapping(#[case] err: ApiError, #[case] expected: StatusCode) {
        assert_eq!(err.into_response().status(), expected);
    }

    #[test]
    fn test_internal_error_is_not_leaked() {
        let response = ApiError::Internal(anyhow::anyhow!("secret detail")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
