//! API error type and its JSON rendering.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Unauthorized(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Too many active sessions (max: {0})")]
    TooManySessions(usize),

    /// A required external service has no credentials.
    #[error("{0}")]
    NotConfigured(String),

    /// An external API answered with a non-success status.
    #[error("{message}")]
    Upstream {
        status: u16,
        message: String,
        details: String,
    },

    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn unauthorized() -> Self {
        ApiError::Unauthorized("Unauthorized".to_string())
    }

    pub fn not_found(what: &str) -> Self {
        ApiError::NotFound(format!("{what} not found"))
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub code: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Unauthorized(_) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED"),
            ApiError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Conflict(_) => (StatusCode::CONFLICT, "CONFLICT"),
            ApiError::TooManySessions(_) => {
                (StatusCode::SERVICE_UNAVAILABLE, "TOO_MANY_SESSIONS")
            }
            ApiError::NotConfigured(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "NOT_CONFIGURED")
            }
            ApiError::Upstream { status, .. } => (
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY),
                "UPSTREAM_ERROR",
            ),
            ApiError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let (message, details) = match self {
            ApiError::Upstream {
                message, details, ..
            } => (message, Some(details)),
            // Internal details stay in the log.
            ApiError::Internal(_) => ("Internal server error".to_string(), None),
            other => (other.to_string(), None),
        };

        let body = ErrorResponse {
            success: false,
            code,
            message,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<spiritual_core::Error> for ApiError {
    fn from(err: spiritual_core::Error) -> Self {
        match err {
            spiritual_core::Error::Validation(msg) => ApiError::BadRequest(msg),
            spiritual_core::Error::Conflict(msg) => ApiError::Conflict(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        let cases = [
            (ApiError::unauthorized(), StatusCode::UNAUTHORIZED),
            (ApiError::Forbidden("no".into()), StatusCode::FORBIDDEN),
            (ApiError::not_found("Festival"), StatusCode::NOT_FOUND),
            (ApiError::BadRequest("bad".into()), StatusCode::BAD_REQUEST),
            (ApiError::Conflict("dup".into()), StatusCode::CONFLICT),
            (ApiError::TooManySessions(2), StatusCode::SERVICE_UNAVAILABLE),
            (
                ApiError::NotConfigured("missing key".into()),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (
                ApiError::Upstream {
                    status: 429,
                    message: "Error from ElevenLabs API".into(),
                    details: "quota".into(),
                },
                StatusCode::TOO_MANY_REQUESTS,
            ),
            (ApiError::Internal("boom".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }

    #[test]
    fn test_core_errors_map_to_client_errors() {
        let err: ApiError = spiritual_core::Error::Validation("title must not be empty".into()).into();
        assert!(matches!(err, ApiError::BadRequest(_)));
        let err: ApiError = spiritual_core::Error::Conflict("email taken".into()).into();
        assert!(matches!(err, ApiError::Conflict(_)));
        let err: ApiError = spiritual_core::Error::InvalidData("bad row".into()).into();
        assert!(matches!(err, ApiError::Internal(_)));
    }
}
