//! Pure document extraction REST API client.
//!
//! A minimal client for the extraction service. It sends one document together
//! with a field schema and returns whatever JSON document the service produces.
//!
//! # Example
//!
//! ```rust,ignore
//! use extract_client::{ExtractClient, ExtractionRequest, SchemaPayload};
//!
//! let client = ExtractClient::new("https://extract.example.com", "secret-token");
//!
//! let result = client.extract(&ExtractionRequest {
//!     file_content: base64_pdf,
//!     extraction_schema: SchemaPayload { fields },
//!     document_description: "invoice".into(),
//!     file_extension: ".pdf".into(),
//! }).await?;
//! ```

pub mod error;
pub mod types;

pub use error::{ExtractError, Result, DEFAULT_FAILURE_MESSAGE};
pub use types::{ExtractionRequest, FieldPayload, SchemaPayload};

use std::time::Duration;

use reqwest::header::ACCEPT;
use types::ApiErrorBody;

const EXTRACT_PATH: &str = "/api/v1/extract";

#[derive(Clone)]
pub struct ExtractClient {
    client: reqwest::Client,
    base_url: String,
    token: String,
}

impl ExtractClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            token: token.into(),
        }
    }

    /// Rebuild the underlying HTTP client with a request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Submit one document for extraction.
    pub async fn extract(&self, request: &ExtractionRequest) -> Result<serde_json::Value> {
        let url = format!("{}{}", self.base_url, EXTRACT_PATH);
        tracing::debug!(
            url = %url,
            fields = request.extraction_schema.fields.len(),
            extension = %request.file_extension,
            "Submitting document for extraction"
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .header(ACCEPT, "application/json")
            .json(request)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .filter(|m| !m.is_empty())
                .unwrap_or_else(|| DEFAULT_FAILURE_MESSAGE.to_string());
            tracing::warn!(status = status.as_u16(), %message, "Extraction API rejected request");
            return Err(ExtractError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let bytes = resp.bytes().await?;
        let value = serde_json::from_slice(&bytes)?;
        Ok(value)
    }
}
