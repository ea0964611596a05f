//! Testing utilities including mock implementations.
//!
//! These let applications exercise sessions and template workflows without
//! making real extraction calls or opening a database.

use async_trait::async_trait;
use extract_client::{ExtractError, ExtractionRequest};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::error::{Result, StudioError};
use crate::traits::{Extractor, SnapshotStore, TemplateStore};
use crate::types::{ExtractionSchema, SchemaSnapshot, Template};

/// Scripted reply of the mock extractor.
#[derive(Debug, Clone)]
pub enum MockReply {
    Ok(serde_json::Value),
    /// Fails like a non-2xx API response carrying this message.
    Fail(String),
}

/// A mock extractor that records every request.
///
/// Replies are consumed in order; once the script runs out the fallback
/// (default: `{}`) is returned.
#[derive(Clone, Default)]
pub struct MockExtractor {
    replies: Arc<Mutex<VecDeque<MockReply>>>,
    fallback: Arc<Mutex<Option<serde_json::Value>>>,
    calls: Arc<Mutex<Vec<ExtractionRequest>>>,
}

impl MockExtractor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful reply.
    pub fn with_reply(self, value: serde_json::Value) -> Self {
        self.push(MockReply::Ok(value));
        self
    }

    /// Queue a failing reply.
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.push(MockReply::Fail(message.into()));
        self
    }

    /// Reply used once the script is exhausted.
    pub fn with_fallback(self, value: serde_json::Value) -> Self {
        if let Ok(mut fallback) = self.fallback.lock() {
            *fallback = Some(value);
        }
        self
    }

    fn push(&self, reply: MockReply) {
        if let Ok(mut replies) = self.replies.lock() {
            replies.push_back(reply);
        }
    }

    /// Requests received so far, in call order.
    pub fn calls(&self) -> Vec<ExtractionRequest> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().map(|c| c.len()).unwrap_or(0)
    }
}

#[async_trait]
impl Extractor for MockExtractor {
    async fn extract(&self, request: &ExtractionRequest) -> Result<serde_json::Value> {
        self.calls
            .lock()
            .map_err(|e| StudioError::storage(e.to_string()))?
            .push(request.clone());

        let reply = self
            .replies
            .lock()
            .map_err(|e| StudioError::storage(e.to_string()))?
            .pop_front();

        match reply {
            Some(MockReply::Ok(value)) => Ok(value),
            Some(MockReply::Fail(message)) => Err(StudioError::Extract(ExtractError::Api {
                status: 500,
                message,
            })),
            None => Ok(self
                .fallback
                .lock()
                .ok()
                .and_then(|f| f.clone())
                .unwrap_or_else(|| serde_json::json!({}))),
        }
    }
}

/// A store whose every call fails with a storage error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingStore;

fn unavailable<T>() -> Result<T> {
    Err(StudioError::storage("store unavailable"))
}

#[async_trait]
impl TemplateStore for FailingStore {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        unavailable()
    }

    async fn find_template_by_name(&self, _name: &str) -> Result<Option<Template>> {
        unavailable()
    }

    async fn get_template(&self, _template_id: i64) -> Result<Option<Template>> {
        unavailable()
    }

    async fn insert_template(&self, _name: &str, _schema: &ExtractionSchema) -> Result<Template> {
        unavailable()
    }

    async fn update_template(
        &self,
        _template_id: i64,
        _name: &str,
        _schema: &ExtractionSchema,
    ) -> Result<Template> {
        unavailable()
    }
}

#[async_trait]
impl SnapshotStore for FailingStore {
    async fn save_snapshot(&self, _schema: &serde_json::Value) -> Result<SchemaSnapshot> {
        unavailable()
    }
}
