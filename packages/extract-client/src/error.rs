//! Error types for the extraction API client.

use thiserror::Error;

/// Result type for extraction client operations.
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Extraction client errors.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Network error (connection refused, timeout, TLS)
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-2xx response. `message` comes from the body's `message` field.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// Response body was not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ExtractError {
    /// Message suitable for surfacing to an end user.
    pub fn user_message(&self) -> &str {
        match self {
            ExtractError::Api { message, .. } => message,
            _ => DEFAULT_FAILURE_MESSAGE,
        }
    }
}

/// Fallback text when the API does not explain a failure.
pub const DEFAULT_FAILURE_MESSAGE: &str = "Failed to extract data";
