//! Extraction service abstraction.

use async_trait::async_trait;
use extract_client::{ExtractClient, ExtractionRequest};

use crate::error::Result;

/// Anything that turns one document plus a schema into a JSON result.
#[async_trait]
pub trait Extractor: Send + Sync {
    async fn extract(&self, request: &ExtractionRequest) -> Result<serde_json::Value>;
}

#[async_trait]
impl Extractor for ExtractClient {
    async fn extract(&self, request: &ExtractionRequest) -> Result<serde_json::Value> {
        Ok(ExtractClient::extract(self, request).await?)
    }
}

#[async_trait]
impl<T: Extractor + ?Sized> Extractor for std::sync::Arc<T> {
    async fn extract(&self, request: &ExtractionRequest) -> Result<serde_json::Value> {
        (**self).extract(request).await
    }
}
