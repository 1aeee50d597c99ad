//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Station credentials are missing or unusable
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// DNS, connect, timeout or body read failure
    #[error("Network error: {0}")]
    Network(String),

    /// Provider answered with a non-success status
    #[error("Fetch failed with status {status}")]
    Fetch {
        /// HTTP status code
        status: u16,
    },

    /// Provider answered with a body that could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Provider returned no observations
    #[error("No observations returned")]
    EmptyResult,

    /// Preference store read or write failed
    #[error("Storage error: {0}")]
    Storage(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error is retryable
    ///
    /// Missing credentials and domain validation failures are not: asking
    /// again later would yield the same answer.
    pub const fn is_retryable(&self) -> bool {
        !matches!(self, Self::Domain(_) | Self::Configuration(_))
    }
}
