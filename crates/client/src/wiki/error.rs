//! Wikipedia API client error types.

use std::sync::Arc;

/// Errors from the Wikipedia API client.
#[derive(Debug, Clone, thiserror::Error)]
pub enum WikiError {
    /// Invalid search term.
    #[error("invalid query: {0}")]
    InvalidQuery(String),

    /// Configured endpoint is not a valid URL.
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// HTTP error response.
    #[error("HTTP error: {status}")]
    HttpError { status: u16 },

    /// Request timeout.
    #[error("request timeout")]
    Timeout,

    /// Network error.
    #[error("network error: {0}")]
    Network(Arc<reqwest::Error>),

    /// The API answered with an error object instead of query results.
    #[error("API error {code}: {info}")]
    Api { code: String, info: String },

    /// Response parse error.
    #[error("parse error: {0}")]
    Parse(String),
}

impl WikiError {
    /// Whether this is a transport or HTTP-status failure, as opposed to a
    /// malformed request or response.
    pub fn is_network(&self) -> bool {
        matches!(self, WikiError::HttpError { .. } | WikiError::Timeout | WikiError::Network(_))
    }
}

impl From<reqwest::Error> for WikiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() { WikiError::Timeout } else { WikiError::Network(Arc::new(err)) }
    }
}
