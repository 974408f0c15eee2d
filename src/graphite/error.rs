//! Graphite backend error types.

use thiserror::Error;

use crate::graphite::time::TimeParseError;

/// Errors that can occur while querying the Graphite backend.
#[derive(Error, Debug)]
pub enum GraphiteError {
    /// Malformed or unsupported time/interval parameter
    #[error(transparent)]
    Time(#[from] TimeParseError),

    /// Graphite answered with an error status (400-599); carries the
    /// status code and the raw, unparsed body text
    #[error("Got error response for request to graphite: ({status}) {body}")]
    ErrorResponse { status: u16, body: String },

    /// The response body was not the expected render JSON shape
    #[error("Invalid response body from graphite: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    /// Request to Graphite timed out
    #[error("Request to graphite timed out")]
    Timeout,

    /// Could not connect to Graphite
    #[error("Graphite unavailable")]
    Unavailable,

    /// Any other transport failure
    #[error("Request to graphite failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// Result type for Graphite operations.
pub type GraphiteResult<T> = Result<T, GraphiteError>;
