//! CLI-specific error types and mappings.
//!
//! This module provides the error type for the CLI adapter and the mapping
//! from `ClientError` to exit codes and user-facing messages.

use thiserror::Error;
use weave_core::ClientError;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid input, rejected locally or by the server.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// A tenant, collection or workflow does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Credentials are missing or were refused.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// The cluster or a hosted service failed or could not be reached.
    #[error("Service error: {0}")]
    Service(String),

    /// A service answered with something unexpected.
    #[error("Protocol error: {0}")]
    Protocol(String),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A workflow did not finish in time.
    #[error("{0}")]
    Timeout(String),

    /// Writing output failed.
    #[error("IO error: {0}")]
    Io(String),
}

impl CliError {
    /// Map error to appropriate exit code.
    ///
    /// Exit codes follow sysexits.h where one fits.
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Arguments(_) => 2,     // EX_USAGE
            Self::NotFound(_) => 66,     // EX_NOINPUT
            Self::Service(_) => 69,      // EX_UNAVAILABLE
            Self::Io(_) => 74,           // EX_IOERR
            Self::Timeout(_) => 75,      // EX_TEMPFAIL
            Self::Protocol(_) => 76,     // EX_PROTOCOL
            Self::Unauthorized(_) => 77, // EX_NOPERM
            Self::Config(_) => 78,       // EX_CONFIG
        }
    }
}

impl From<ClientError> for CliError {
    fn from(err: ClientError) -> Self {
        let message = err.to_string();
        match err {
            ClientError::Validation { message } => Self::Arguments(message),
            ClientError::NotFound { resource } => Self::NotFound(resource),
            ClientError::Unauthorized { .. } => Self::Unauthorized(message),
            ClientError::Api { .. } | ClientError::Transport { .. } => Self::Service(message),
            ClientError::InvalidResponse { .. } => Self::Protocol(message),
            ClientError::Configuration { message } => Self::Config(message),
            ClientError::Timeout { .. } => Self::Timeout(message),
        }
    }
}

impl From<serde_json::Error> for CliError {
    fn from(err: serde_json::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
