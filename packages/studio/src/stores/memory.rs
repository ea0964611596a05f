//! In-memory storage implementation for testing and development.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::{Result, StudioError};
use crate::traits::store::{SnapshotStore, TemplateStore};
use crate::types::{ExtractionSchema, SchemaSnapshot, Template};

#[derive(Default)]
struct Tables {
    templates: Vec<Template>,
    snapshots: Vec<SchemaSnapshot>,
    next_template_id: i64,
    next_snapshot_id: i64,
}

/// In-memory storage for templates and snapshots.
///
/// Enforces the same unique-name rule as the database table. Data is lost
/// on restart.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    writes: AtomicUsize,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful template inserts and updates so far.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Get the number of stored templates.
    pub fn template_count(&self) -> usize {
        self.read().map(|t| t.templates.len()).unwrap_or(0)
    }

    /// Get the number of stored snapshots.
    pub fn snapshot_count(&self) -> usize {
        self.read().map(|t| t.snapshots.len()).unwrap_or(0)
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Tables>> {
        self.tables
            .read()
            .map_err(|e| StudioError::storage(e.to_string()))
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Tables>> {
        self.tables
            .write()
            .map_err(|e| StudioError::storage(e.to_string()))
    }
}

fn name_taken(tables: &Tables, name: &str, except: Option<i64>) -> bool {
    tables
        .templates
        .iter()
        .any(|t| t.template_name == name && Some(t.template_id) != except)
}

#[async_trait]
impl TemplateStore for MemoryStore {
    async fn list_templates(&self) -> Result<Vec<Template>> {
        Ok(self.read()?.templates.clone())
    }

    async fn find_template_by_name(&self, name: &str) -> Result<Option<Template>> {
        Ok(self
            .read()?
            .templates
            .iter()
            .find(|t| t.template_name == name)
            .cloned())
    }

    async fn get_template(&self, template_id: i64) -> Result<Option<Template>> {
        Ok(self
            .read()?
            .templates
            .iter()
            .find(|t| t.template_id == template_id)
            .cloned())
    }

    async fn insert_template(&self, name: &str, schema: &ExtractionSchema) -> Result<Template> {
        let mut tables = self.write()?;
        if name_taken(&tables, name, None) {
            return Err(StudioError::DuplicateName { name: name.to_string() });
        }

        tables.next_template_id += 1;
        let now = Utc::now();
        let template = Template {
            template_id: tables.next_template_id,
            template_name: name.to_string(),
            extraction_schema: schema.clone(),
            created_at: Some(now),
            updated_at: Some(now),
        };
        tables.templates.push(template.clone());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(template)
    }

    async fn update_template(
        &self,
        template_id: i64,
        name: &str,
        schema: &ExtractionSchema,
    ) -> Result<Template> {
        let mut tables = self.write()?;
        if name_taken(&tables, name, Some(template_id)) {
            return Err(StudioError::DuplicateName { name: name.to_string() });
        }

        let template = tables
            .templates
            .iter_mut()
            .find(|t| t.template_id == template_id)
            .ok_or(StudioError::TemplateNotFound { template_id })?;
        template.template_name = name.to_string();
        template.extraction_schema = schema.clone();
        template.updated_at = Some(Utc::now());
        let updated = template.clone();
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(updated)
    }
}

#[async_trait]
impl SnapshotStore for MemoryStore {
    async fn save_snapshot(&self, schema: &serde_json::Value) -> Result<SchemaSnapshot> {
        let mut tables = self.write()?;
        tables.next_snapshot_id += 1;
        let snapshot = SchemaSnapshot {
            snapshot_id: tables.next_snapshot_id,
            schema: schema.clone(),
            created_at: Utc::now(),
        };
        tables.snapshots.push(snapshot.clone());
        Ok(snapshot)
    }
}
