//! Error types for the Azure DevOps client

use thiserror::Error;

/// Result type alias for client operations
pub type Result<T> = std::result::Result<T, ClientError>;

/// Errors that can occur when talking to Azure DevOps
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),

    /// API returned an error status code
    #[error("API error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error message from the API
        message: String,
    },

    /// The service answered with its sign-in page instead of data
    ///
    /// Azure DevOps does this (HTTP 203) when the access token is invalid or expired.
    #[error("Unauthorized: the access token was not accepted")]
    Unauthorized,

    /// Failed to parse response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl ClientError {
    /// Create an API error from status code and message
    pub fn api_error(status: u16, message: impl Into<String>) -> Self {
        Self::ApiError {
            status,
            message: message.into(),
        }
    }

    /// Check if the service rejected the request itself (4xx status or bad credentials)
    pub fn is_client_error(&self) -> bool {
        match self {
            Self::ApiError { status, .. } => (400..500).contains(status),
            Self::Unauthorized => true,
            _ => false,
        }
    }
}
