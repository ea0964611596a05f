//! Save reconciliation: decide between update, insert and rejection.
//!
//! A save names a template and optionally carries the template the schema was
//! loaded from. The rules, in order:
//!
//! 1. a blank name is rejected;
//! 2. a different template already holding the name is a duplicate;
//! 3. a loaded template saved under its original name is updated in place;
//! 4. anything else inserts a new template.
//!
//! Exactly one write happens per successful call, none on rejection. Retrying
//! an update is idempotent; retrying an insert is not.

use tracing::info;

use crate::error::{Result, StudioError};
use crate::traits::TemplateStore;
use crate::types::{ExtractionSchema, LoadedTemplate, Template};

/// Arguments of a reconciling save.
#[derive(Debug, Clone)]
pub struct SaveTemplate {
    pub name: String,
    pub schema: ExtractionSchema,
    pub loaded: Option<LoadedTemplate>,
}

/// What a save did.
#[derive(Debug, Clone, PartialEq)]
pub enum SaveOutcome {
    Created(Template),
    Updated(Template),
}

impl SaveOutcome {
    pub fn template(&self) -> &Template {
        match self {
            SaveOutcome::Created(t) | SaveOutcome::Updated(t) => t,
        }
    }

    pub fn into_template(self) -> Template {
        match self {
            SaveOutcome::Created(t) | SaveOutcome::Updated(t) => t,
        }
    }

    pub fn is_update(&self) -> bool {
        matches!(self, SaveOutcome::Updated(_))
    }
}

fn required_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(StudioError::validation("Template name is required"));
    }
    Ok(trimmed)
}

/// Reject when a template other than `allowed_id` already has `name`.
async fn ensure_name_free<S: TemplateStore + ?Sized>(
    store: &S,
    name: &str,
    allowed_id: Option<i64>,
) -> Result<()> {
    if let Some(existing) = store.find_template_by_name(name).await? {
        if Some(existing.template_id) != allowed_id {
            return Err(StudioError::DuplicateName {
                name: name.to_string(),
            });
        }
    }
    Ok(())
}

/// Reconciling save.
pub async fn save_template<S: TemplateStore + ?Sized>(
    store: &S,
    request: SaveTemplate,
) -> Result<SaveOutcome> {
    let name = required_name(&request.name)?;
    let loaded_id = request.loaded.as_ref().map(|l| l.id);

    ensure_name_free(store, name, loaded_id).await?;

    match &request.loaded {
        Some(loaded) if loaded.name.trim() == name => {
            let template = store
                .update_template(loaded.id, name, &request.schema)
                .await?;
            info!(template_id = template.template_id, name, "Template updated");
            Ok(SaveOutcome::Updated(template))
        }
        _ => {
            let template = store.insert_template(name, &request.schema).await?;
            info!(template_id = template.template_id, name, "Template created");
            Ok(SaveOutcome::Created(template))
        }
    }
}

/// "Save As": always inserts.
pub async fn save_template_as<S: TemplateStore + ?Sized>(
    store: &S,
    name: &str,
    schema: &ExtractionSchema,
) -> Result<Template> {
    let name = required_name(name)?;
    ensure_name_free(store, name, None).await?;

    let template = store.insert_template(name, schema).await?;
    info!(template_id = template.template_id, name, "Template created");
    Ok(template)
}

/// "Update": always targets `template_id`, which is the only identity.
/// Renaming is allowed as long as the new name is free.
pub async fn update_template_by_id<S: TemplateStore + ?Sized>(
    store: &S,
    template_id: i64,
    name: &str,
    schema: &ExtractionSchema,
) -> Result<Template> {
    let name = required_name(name)?;
    ensure_name_free(store, name, Some(template_id)).await?;

    let template = store.update_template(template_id, name, schema).await?;
    info!(template_id, name, "Template updated");
    Ok(template)
}
