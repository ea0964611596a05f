//! Extraction session: the working state of one extraction attempt.
//!
//! A session holds the uploaded documents, the schema being edited, the
//! document description and the single result slot. Converting several files
//! runs one extraction call after another and every result overwrites the
//! slot, so only the last file's result survives.

use extract_client::ExtractionRequest;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::editor::SchemaEditor;
use crate::error::{Result, StudioError};
use crate::export::{self, ExportFormat};
use crate::templates::{self, SaveOutcome, SaveTemplate, SelectedTemplate};
use crate::traits::{Extractor, TemplateStore};
use crate::types::{ExtractionSchema, LoadedTemplate, UploadedFile};

/// Which uploaded files a conversion covers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConvertTarget {
    #[default]
    Selected,
    All,
}

pub struct ExtractionSession<E> {
    extractor: E,
    files: Vec<UploadedFile>,
    selected: Option<usize>,
    description: String,
    editor: SchemaEditor,
    loaded: Option<LoadedTemplate>,
    result: Option<Value>,
}

impl<E: Extractor> ExtractionSession<E> {
    pub fn new(extractor: E) -> Self {
        Self {
            extractor,
            files: Vec::new(),
            selected: None,
            description: String::new(),
            editor: SchemaEditor::new(),
            loaded: None,
            result: None,
        }
    }

    // ---------------------------------------------------------------------
    // Uploads
    // ---------------------------------------------------------------------

    /// Append files after the ones already uploaded and select the last one.
    pub fn upload(&mut self, files: impl IntoIterator<Item = UploadedFile>) {
        let before = self.files.len();
        self.files.extend(files);
        if self.files.len() > before {
            self.selected = Some(self.files.len() - 1);
            debug!(added = self.files.len() - before, total = self.files.len(), "Files uploaded");
        }
    }

    pub fn files(&self) -> &[UploadedFile] {
        &self.files
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected_file(&self) -> Option<&UploadedFile> {
        self.selected.and_then(|i| self.files.get(i))
    }

    pub fn select_file(&mut self, index: usize) {
        if index < self.files.len() {
            self.selected = Some(index);
        } else {
            debug!(index, "select_file out of bounds");
        }
    }

    /// Remove a file. Removing the selected file selects the first remaining one.
    pub fn remove_file(&mut self, index: usize) {
        if index >= self.files.len() {
            return;
        }
        self.files.remove(index);
        self.selected = match self.selected {
            Some(s) if s == index => (!self.files.is_empty()).then_some(0),
            Some(s) if s > index => Some(s - 1),
            other => other,
        };
    }

    // ---------------------------------------------------------------------
    // Schema, description, templates
    // ---------------------------------------------------------------------

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn editor(&self) -> &SchemaEditor {
        &self.editor
    }

    pub fn editor_mut(&mut self) -> &mut SchemaEditor {
        &mut self.editor
    }

    pub fn schema(&self) -> ExtractionSchema {
        self.editor.to_schema()
    }

    /// The template the working schema came from, if any.
    pub fn loaded_template(&self) -> Option<&LoadedTemplate> {
        self.loaded.as_ref()
    }

    /// Bind a picked template: schema, description (the template's name) and
    /// identity for the next save.
    pub fn apply_template(&mut self, selected: &SelectedTemplate) {
        self.editor.load(selected.schema.clone());
        self.description = selected.description.clone();
        self.loaded = Some(selected.loaded.clone());
        info!(template_id = selected.loaded.id, "Template applied to session");
    }

    /// Save the working schema under `name` using the reconciling rules.
    ///
    /// On success the saved template becomes the loaded one, so saving again
    /// under the same name updates it.
    pub async fn save_template<S: TemplateStore + ?Sized>(
        &mut self,
        store: &S,
        name: &str,
    ) -> Result<SaveOutcome> {
        let request = SaveTemplate {
            name: name.to_string(),
            schema: self.schema(),
            loaded: self.loaded.clone(),
        };
        let outcome = templates::save_template(store, request).await?;
        self.loaded = Some(LoadedTemplate::from(outcome.template()));
        Ok(outcome)
    }

    // ---------------------------------------------------------------------
    // Conversion
    // ---------------------------------------------------------------------

    fn request_for(&self, file: &UploadedFile, schema: &ExtractionSchema) -> ExtractionRequest {
        ExtractionRequest {
            file_content: file.to_base64(),
            extraction_schema: schema.to_payload(),
            document_description: self.description.clone(),
            file_extension: file.extension(),
        }
    }

    /// Run extraction for the selected file or for every file in upload order.
    ///
    /// Validation failures make no network call. The first failing call
    /// aborts the remaining files; whatever the slot held before that call
    /// stays in place.
    pub async fn convert(&mut self, target: ConvertTarget) -> Result<&Value> {
        let indices: Vec<usize> = match target {
            ConvertTarget::Selected => match self.selected_file() {
                Some(_) => self.selected.into_iter().collect(),
                None => return Err(StudioError::validation("Please select a file to convert")),
            },
            ConvertTarget::All if self.files.is_empty() => {
                return Err(StudioError::validation("Please upload a file to convert"));
            }
            ConvertTarget::All => (0..self.files.len()).collect(),
        };

        let schema = self.schema();
        if schema.is_empty() {
            return Err(StudioError::validation(
                "Add at least one field to the schema before converting",
            ));
        }
        for issue in schema.issues() {
            warn!(%issue, "Schema issue");
        }

        info!(?target, files = indices.len(), fields = schema.len(), "Starting conversion");
        for (n, index) in indices.iter().enumerate() {
            let file = &self.files[*index];
            let request = self.request_for(file, &schema);
            debug!(file = %file.name, bytes = file.len(), step = n + 1, "Extracting");

            match self.extractor.extract(&request).await {
                Ok(value) => self.result = Some(value),
                Err(e) => {
                    warn!(file = %file.name, error = %e, "Failed to convert file");
                    return Err(e);
                }
            }
        }

        self.result
            .as_ref()
            .ok_or_else(|| StudioError::validation("Conversion produced no result"))
    }

    // ---------------------------------------------------------------------
    // Result
    // ---------------------------------------------------------------------

    pub fn result(&self) -> Option<&Value> {
        self.result.as_ref()
    }

    /// Drop the current result ("back" to editing).
    pub fn clear_result(&mut self) {
        self.result = None;
    }

    fn require_result(&self) -> Result<&Value> {
        self.result
            .as_ref()
            .ok_or_else(|| StudioError::validation("No extracted data to export"))
    }

    pub fn to_json(&self) -> Result<String> {
        export::to_json(self.require_result()?)
    }

    pub fn to_csv(&self) -> Result<String> {
        export::to_csv(self.require_result()?)
    }

    pub fn export(&self, format: ExportFormat) -> Result<String> {
        format.render(self.require_result()?)
    }
}
