//! Listing API client error types.

use std::sync::Arc;

/// Errors from the upstream listing API.
#[derive(Debug, thiserror::Error)]
pub enum UpstreamError {
    /// The listing URL could not be built.
    #[error("invalid URL: {0}")]
    InvalidUrl(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// Response body is not JSON of a known shape.
    #[error("parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for UpstreamError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { UpstreamError::Timeout } else { UpstreamError::Network(Arc::new(err)) }
    }
}

impl From<UpstreamError> for regal_core::Error {
    fn from(err: UpstreamError) -> Self {
        regal_core::Error::Upstream(err.to_string())
    }
}
