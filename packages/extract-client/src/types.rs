use serde::{Deserialize, Serialize};

/// Body of `POST /api/v1/extract`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionRequest {
    /// Base64-encoded document bytes (no data-URL prefix).
    pub file_content: String,
    pub extraction_schema: SchemaPayload,
    pub document_description: String,
    /// Lowercase extension with a leading dot, e.g. `.pdf`.
    pub file_extension: String,
}

/// Wrapper the API expects around the field list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SchemaPayload {
    pub fields: Vec<FieldPayload>,
}

/// One field as sent over the wire. `children` is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldPayload {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub description: String,
    #[serde(default)]
    pub children: Vec<FieldPayload>,
}

/// Error body returned on non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ApiErrorBody {
    pub message: Option<String>,
}
