//! Storage traits for templates and raw schema snapshots.
//!
//! - `TemplateStore`: named, reusable schemas
//! - `SnapshotStore`: raw schema blobs, unrelated to templates
//! - `StudioStore`: composite of both

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ExtractionSchema, SchemaSnapshot, Template};

/// Persistence for templates.
///
/// Implementations must enforce template name uniqueness themselves and report
/// a violation as [`StudioError::DuplicateName`](crate::StudioError::DuplicateName).
/// A prior lookup by name is not enough: two sessions can race between the
/// check and the write.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// All templates, no pagination.
    async fn list_templates(&self) -> Result<Vec<Template>>;

    /// Exact, case-sensitive name match.
    async fn find_template_by_name(&self, name: &str) -> Result<Option<Template>>;

    /// Get a template by id.
    async fn get_template(&self, template_id: i64) -> Result<Option<Template>>;

    /// Create a template, allocating a new id.
    async fn insert_template(&self, name: &str, schema: &ExtractionSchema) -> Result<Template>;

    /// Overwrite name and schema of an existing template and bump `updated_at`.
    ///
    /// Returns `TemplateNotFound` when the id does not exist.
    async fn update_template(
        &self,
        template_id: i64,
        name: &str,
        schema: &ExtractionSchema,
    ) -> Result<Template>;
}

/// Persistence for raw schema blobs.
#[async_trait]
pub trait SnapshotStore: Send + Sync {
    async fn save_snapshot(&self, schema: &serde_json::Value) -> Result<SchemaSnapshot>;
}

/// Composite storage trait used by the server.
pub trait StudioStore: TemplateStore + SnapshotStore {}

impl<T: TemplateStore + SnapshotStore> StudioStore for T {}
