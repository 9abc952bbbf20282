//! Internal error types for HTTP dispatch.
//!
//! These errors are internal to `weave-http` and are mapped to
//! `ClientError` at the port boundary.

use thiserror::Error;

/// Result type alias for HTTP dispatch.
pub type HttpResult<T> = Result<T, HttpError>;

/// Errors raised while sending a request or reading its response.
#[derive(Debug, Error)]
pub enum HttpError {
    /// The server answered with a non-success status.
    #[error("{method} {url} failed with status {status}: {body}")]
    ApiRequestFailed {
        /// HTTP method of the request
        method: &'static str,
        /// HTTP status code
        status: u16,
        /// The URL that was requested
        url: String,
        /// Response body text, possibly empty
        body: String,
    },

    /// The response body was not what the endpoint promises.
    #[error("Invalid response: {message}")]
    InvalidResponse {
        /// Description of what was invalid
        message: String,
    },

    /// A base URL cannot have path segments appended (e.g. `mailto:`).
    #[error("URL cannot be used as a base: {url}")]
    InvalidBaseUrl {
        /// The offending URL
        url: String,
    },

    /// Network or HTTP client error.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl HttpError {
    /// HTTP status of a failed request, if the server answered.
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::ApiRequestFailed { status, .. } => Some(*status),
            _ => None,
        }
    }
}
