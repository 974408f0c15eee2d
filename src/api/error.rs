//! API Error Types
//!
//! Defines error types for the API layer and implements conversion
//! to HTTP responses with appropriate status codes.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::graphite::{GraphiteError, TimeParseError};

/// API error types
#[derive(Error, Debug)]
pub enum ApiError {
    /// Request validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// Graphite backend or query-translation error
    #[error("Graphite error: {0}")]
    Graphite(#[from] GraphiteError),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TimeParseError> for ApiError {
    fn from(e: TimeParseError) -> Self {
        ApiError::Graphite(GraphiteError::Time(e))
    }
}

/// Error response body
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: ErrorBody,
    pub request_id: String,
}

/// Error details
#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::Validation(_) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR"),
            ApiError::Graphite(e) => match e {
                // Bad input: malformed interval / unsupported time shape
                GraphiteError::Time(TimeParseError::InvalidInterval(_)) => {
                    (StatusCode::BAD_REQUEST, "PARSE_ERROR")
                }
                GraphiteError::Time(TimeParseError::AbsoluteTimeUnsupported(_)) => {
                    (StatusCode::BAD_REQUEST, "UNSUPPORTED_TIME")
                }
                GraphiteError::ErrorResponse { .. } => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
                GraphiteError::InvalidResponse(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
                GraphiteError::Timeout => (StatusCode::GATEWAY_TIMEOUT, "BACKEND_TIMEOUT"),
                GraphiteError::Unavailable => {
                    (StatusCode::SERVICE_UNAVAILABLE, "BACKEND_UNAVAILABLE")
                }
                GraphiteError::Request(_) => (StatusCode::BAD_GATEWAY, "BACKEND_ERROR"),
            },
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
            ApiError::Io(_) => (StatusCode::INTERNAL_SERVER_ERROR, "IO_ERROR"),
        };

        let request_id = uuid::Uuid::new_v4().to_string();

        // Log the error
        tracing::error!(
            request_id = %request_id,
            error_code = %code,
            error_message = %self,
            "API error occurred"
        );

        let body = ErrorResponse {
            error: ErrorBody {
                code: code.to_string(),
                message: self.to_string(),
            },
            request_id,
        };

        (status, Json(body)).into_response()
    }
}

/// Result type for API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    fn status_of(err: ApiError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn parse_errors_are_bad_request() {
        let err = TimeParseError::InvalidInterval("2fortnights".to_string());
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn unsupported_time_is_bad_request() {
        let err = TimeParseError::AbsoluteTimeUnsupported("2014-01-01".to_string());
        assert_eq!(status_of(err.into()), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn backend_errors_are_bad_gateway() {
        let err = ApiError::Graphite(GraphiteError::ErrorResponse {
            status: 400,
            body: ":(".to_string(),
        });
        assert_eq!(status_of(err), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn backend_unavailable_is_service_unavailable() {
        let err = ApiError::Graphite(GraphiteError::Unavailable);
        assert_eq!(status_of(err), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[test]
    fn backend_timeout_is_gateway_timeout() {
        let err = ApiError::Graphite(GraphiteError::Timeout);
        assert_eq!(status_of(err), StatusCode::GATEWAY_TIMEOUT);
    }
}
