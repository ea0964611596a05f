//! Typed errors for the studio library.
//!
//! Every variant is caught at the boundary of the user action that caused it
//! and turned into a notification; none of them is fatal.

use thiserror::Error;

/// Errors that can occur while editing, saving or converting.
#[derive(Debug, Error)]
pub enum StudioError {
    /// Preconditions of a user action were not met (missing file, empty
    /// schema, missing template name).
    #[error("validation failed: {0}")]
    Validation(String),

    /// Another template already uses this name.
    #[error("a template with this name already exists: {name}")]
    DuplicateName { name: String },

    /// Update targeted a template id that does not exist.
    #[error("template not found: {template_id}")]
    TemplateNotFound { template_id: i64 },

    /// Extraction API call failed.
    #[error("extraction failed: {0}")]
    Extract(#[from] extract_client::ExtractError),

    /// Persistence layer failed (transport, auth, query).
    #[error("storage error: {0}")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Result could not be serialized for export.
    #[error("export error: {0}")]
    Export(String),

    /// JSON encoding or decoding error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StudioError {
    pub fn validation(reason: impl Into<String>) -> Self {
        StudioError::Validation(reason.into())
    }

    pub fn storage(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StudioError::Storage(err.into())
    }

    /// True for transport-level failures (extraction or persistence).
    pub fn is_transport(&self) -> bool {
        matches!(self, StudioError::Extract(_) | StudioError::Storage(_))
    }
}

/// Result type alias for studio operations.
pub type Result<T> = std::result::Result<T, StudioError>;
