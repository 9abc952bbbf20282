//! Error types shared by all client ports.

use thiserror::Error;

/// Errors surfaced by tenant, GFL and agent operations.
///
/// These are domain-level errors that callers can match on.
/// Implementation-specific errors (HTTP, JSON) are mapped to these
/// at the adapter boundary and then propagated unchanged.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The referenced tenant, workflow or collection does not exist.
    #[error("Not found: {resource}")]
    NotFound {
        /// Human-readable description of the missing resource
        resource: String,
    },

    /// The request was rejected before or by the server as invalid.
    #[error("Validation failed: {message}")]
    Validation {
        /// What was invalid
        message: String,
    },

    /// Authentication is missing or was refused.
    #[error("Unauthorized: {message}")]
    Unauthorized {
        /// Server-provided detail
        message: String,
    },

    /// The server answered with an unexpected non-success status.
    #[error("API request failed with status {status}: {message}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Response body or description
        message: String,
    },

    /// Network or connectivity error.
    #[error("Transport error: {message}")]
    Transport {
        /// Description of the transport failure
        message: String,
    },

    /// The server answered with a body that could not be understood.
    #[error("Invalid API response: {message}")]
    InvalidResponse {
        /// What was invalid
        message: String,
    },

    /// Client configuration error.
    #[error("Configuration error: {message}")]
    Configuration {
        /// What's wrong with the configuration
        message: String,
    },

    /// A workflow did not reach a terminal state in time.
    #[error("Timed out waiting for workflow '{workflow_id}'")]
    Timeout {
        /// The workflow that was being polled
        workflow_id: String,
    },
}

impl ClientError {
    /// Shorthand for a [`ClientError::Validation`].
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Shorthand for a [`ClientError::NotFound`].
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::NotFound {
            resource: resource.into(),
        }
    }

    /// Whether this error reports a missing resource.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Result type alias for client port operations.
pub type ClientResult<T> = Result<T, ClientError>;
