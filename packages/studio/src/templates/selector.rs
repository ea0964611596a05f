//! Template selector: the list a user picks a saved template from.

use tracing::{debug, warn};

use crate::error::Result;
use crate::traits::TemplateStore;
use crate::types::{ExtractionSchema, LoadedTemplate, Template};

/// What gets bound into a session when a template is picked.
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedTemplate {
    /// Document description to use. Templates have no description of their
    /// own; this is the template name.
    pub description: String,
    pub schema: ExtractionSchema,
    pub loaded: LoadedTemplate,
}

impl From<&Template> for SelectedTemplate {
    fn from(t: &Template) -> Self {
        Self {
            description: t.template_name.clone(),
            schema: t.extraction_schema.clone(),
            loaded: LoadedTemplate::from(t),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplateSelector {
    templates: Vec<Template>,
}

impl TemplateSelector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Re-read every template. On failure the previous list is kept.
    pub async fn refresh<S: TemplateStore + ?Sized>(&mut self, store: &S) -> Result<usize> {
        match store.list_templates().await {
            Ok(templates) => {
                debug!(count = templates.len(), "Template list refreshed");
                self.templates = templates;
                Ok(self.templates.len())
            }
            Err(e) => {
                warn!(error = %e, "Error loading templates");
                Err(e)
            }
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn select(&self, template_id: i64) -> Option<SelectedTemplate> {
        self.templates
            .iter()
            .find(|t| t.template_id == template_id)
            .map(SelectedTemplate::from)
    }
}
