//! Application error handling
//!
//! Every domain error converts to the uniform response envelope via
//! `IntoResponse`. Credential failures are deliberately generic (no
//! user-enumeration oracle) and internal errors never leak detail.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use campus_connect_shared::types::{ApiEnvelope, ErrorBody, FieldError};
use thiserror::Error;
use tracing::error;

/// API error type that can be converted to HTTP responses
#[derive(Error, Debug)]
pub enum ApiError {
    /// Field-scoped payload validation failure
    #[error("Validation error: {message}")]
    Validation {
        message: String,
        details: Vec<FieldError>,
    },

    #[error("Email already registered")]
    UserExists,

    #[error("Too many failed login attempts")]
    RateLimited,

    /// Covers both unknown email and wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email not verified")]
    EmailNotVerified,

    #[error("Account suspended")]
    AccountSuspended,

    /// Bad or expired email verification token (no reason distinction)
    #[error("Invalid verification token")]
    InvalidVerificationToken,

    /// Bad, expired or wrong-type access token on a protected route
    #[error("Invalid access token")]
    InvalidAccessToken,

    /// Missing or malformed Authorization header
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Internal server error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    /// Convenience constructor for a single-message validation error
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: Vec::new(),
        }
    }

    /// Validation error where every detail shares one field
    pub fn validation_for_field(
        message: impl Into<String>,
        field: &str,
        messages: Vec<String>,
    ) -> Self {
        ApiError::Validation {
            message: message.into(),
            details: messages
                .into_iter()
                .map(|m| FieldError::new(field, m))
                .collect(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            ApiError::Validation { message, details } => (
                StatusCode::BAD_REQUEST,
                ErrorBody::with_details("VALIDATION_ERROR", message, details),
            ),
            ApiError::UserExists => (
                StatusCode::CONFLICT,
                ErrorBody::with_details(
                    "USER_EXISTS",
                    "User with this email already exists",
                    vec![FieldError::new("email", "Email already registered")],
                ),
            ),
            ApiError::RateLimited => (
                StatusCode::TOO_MANY_REQUESTS,
                ErrorBody::new(
                    "RATE_LIMIT_EXCEEDED",
                    "Too many failed login attempts. Please try again in 15 minutes.",
                ),
            ),
            ApiError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("INVALID_CREDENTIALS", "Invalid email or password"),
            ),
            ApiError::EmailNotVerified => (
                StatusCode::FORBIDDEN,
                ErrorBody::new(
                    "EMAIL_NOT_VERIFIED",
                    "Please verify your email address before logging in",
                ),
            ),
            ApiError::AccountSuspended => (
                StatusCode::FORBIDDEN,
                ErrorBody::new(
                    "ACCOUNT_SUSPENDED",
                    "Your account has been suspended. Please contact support.",
                ),
            ),
            ApiError::InvalidVerificationToken => (
                StatusCode::BAD_REQUEST,
                ErrorBody::new("INVALID_TOKEN", "Invalid or expired verification token"),
            ),
            ApiError::InvalidAccessToken => (
                StatusCode::UNAUTHORIZED,
                ErrorBody::new("INVALID_TOKEN", "Invalid or expired access token"),
            ),
            ApiError::Unauthorized(message) => {
                (StatusCode::UNAUTHORIZED, ErrorBody::new("UNAUTHORIZED", message))
            }
            ApiError::UserNotFound => (
                StatusCode::NOT_FOUND,
                ErrorBody::new("USER_NOT_FOUND", "User not found"),
            ),
            ApiError::Internal(err) => {
                error!("Internal error: {:?}", err);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorBody::new("INTERNAL_ERROR", "An internal error occurred"),
                )
            }
        };

        let envelope: ApiEnvelope<()> = ApiEnvelope::failure(body);
        (status, Json(envelope)).into_response()
    }
}

/// Result type alias for API handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_status() {
        let error = ApiError::validation("Invalid input data");
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_user_exists_is_conflict() {
        let response = ApiError::UserExists.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_rate_limited_is_429() {
        let response = ApiError::RateLimited.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    }

    #[test]
    fn test_token_errors_split_by_context() {
        // Same code, different status depending on where it happened
        assert_eq!(
            ApiError::InvalidVerificationToken.into_response().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::InvalidAccessToken.into_response().status(),
            StatusCode::UNAUTHORIZED
        );
    }

    #[test]
    fn test_suspended_and_unverified_are_forbidden() {
        assert_eq!(
            ApiError::EmailNotVerified.into_response().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::AccountSuspended.into_response().status(),
            StatusCode::FORBIDDEN
        );
    }

    #[test]
    fn test_sqlx_error_routes_through_internal() {
        // Repository errors arrive wrapped in anyhow; there is no
        // separate database variant to keep in sync
        let error = ApiError::Internal(anyhow::Error::from(sqlx::Error::PoolTimedOut));
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_internal_error_hides_detail() {
        let error = ApiError::Internal(anyhow::anyhow!("secret stacktrace"));
        let response = error.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let text = String::from_utf8(body.to_vec()).unwrap();
        assert!(!text.contains("stacktrace"));
        assert!(text.contains("INTERNAL_ERROR"));
    }
}
