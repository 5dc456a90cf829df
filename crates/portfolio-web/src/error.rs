//! Mapping of domain errors onto HTTP responses.

use axum::{
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use portfolio_core::{ErrorKind, PortfolioError};
use serde_json::json;
use std::fmt;

/// Error returned by every API handler.
///
/// Serialized as `{"error": <code>, "message": <text>}`.
#[derive(Debug)]
pub struct ApiError {
    pub status_code: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status_code: StatusCode::BAD_REQUEST,
            code: "validation_error",
            message: message.into(),
        }
    }

    pub fn internal() -> Self {
        Self {
            status_code: StatusCode::INTERNAL_SERVER_ERROR,
            code: "internal_error",
            message: "Internal server error".to_string(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<PortfolioError> for ApiError {
    fn from(err: PortfolioError) -> Self {
        let status_code = match err.kind() {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Rejected => StatusCode::BAD_REQUEST,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status_code == StatusCode::INTERNAL_SERVER_ERROR {
            // Details stay in the log.
            tracing::error!(error = %err, "Request failed");
            return Self::internal();
        }
        tracing::debug!(error = %err, "Request rejected");
        let message = err.to_string();

        Self {
            status_code,
            code: err.code(),
            message,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::bad_request(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "error": self.code,
            "message": self.message,
        });
        (self.status_code, Json(body)).into_response()
    }
}

/// Result type alias for API handlers.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use portfolio_core::ProjectStatus;

    #[test]
    fn test_status_codes_follow_error_kind() {
        let err = ApiError::from(PortfolioError::ProjectNotFound(7));
        assert_eq!(err.status_code, StatusCode::NOT_FOUND);
        assert_eq!(err.code, "not_found");

        let err = ApiError::from(PortfolioError::DeletionForbidden(ProjectStatus::Started));
        assert_eq!(err.status_code, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "deletion_forbidden");
    }

    #[test]
    fn test_internal_errors_hide_details() {
        let err = ApiError::from(PortfolioError::Store("mutex poisoned".into()));
        assert_eq!(err.status_code, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code, "internal_error");
        assert!(!err.message.contains("mutex"));
    }
}
