use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::schema::ExtractionSchema;

/// A named, persisted schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    /// Assigned by the store on creation.
    pub template_id: i64,

    /// Unique across all templates (exact, case-sensitive).
    pub template_name: String,

    pub extraction_schema: ExtractionSchema,

    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Identity of the template the working schema was loaded from.
///
/// `name` is the name as loaded, not whatever the user has typed since.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadedTemplate {
    pub id: i64,
    pub name: String,
}

impl From<&Template> for LoadedTemplate {
    fn from(t: &Template) -> Self {
        Self {
            id: t.template_id,
            name: t.template_name.clone(),
        }
    }
}

/// A raw schema blob stored outside the template flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSnapshot {
    pub snapshot_id: i64,
    pub schema: serde_json::Value,
    pub created_at: DateTime<Utc>,
}
