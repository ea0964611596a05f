use axum::{
    extract::{Extension, Multipart, Query},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use extraction_studio::{
    ConvertTarget, ExportFormat, ExtractionSchema, ExtractionSession, FieldNode, UploadedFile,
};
use serde::Deserialize;

use crate::server::app::AppState;
use crate::server::error::ApiError;

#[derive(Debug, Default, Deserialize)]
pub struct ExtractQuery {
    /// Return the result as a downloadable file instead of plain JSON.
    pub format: Option<ExportFormat>,
}

/// The `schema` part accepts either the bare field list or `{ "fields": [...] }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum SchemaPart {
    Fields(Vec<FieldNode>),
    Wrapped(ExtractionSchema),
}

impl From<SchemaPart> for ExtractionSchema {
    fn from(part: SchemaPart) -> Self {
        match part {
            SchemaPart::Fields(fields) => ExtractionSchema::new(fields),
            SchemaPart::Wrapped(schema) => schema,
        }
    }
}

#[derive(Default)]
struct ExtractForm {
    files: Vec<UploadedFile>,
    schema: ExtractionSchema,
    description: String,
    target: ConvertTarget,
    selected: Option<usize>,
}

async fn read_form(mut multipart: Multipart) -> Result<ExtractForm, ApiError> {
    let mut form = ExtractForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart body: {}", e)))?
    {
        let part = field.name().unwrap_or_default().to_string();
        match part.as_str() {
            "file" => {
                let name = field.file_name().unwrap_or_default().to_string();
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::BadRequest(format!("Failed to read file: {}", e)))?;
                form.files.push(UploadedFile::new(name, bytes.to_vec()));
            }
            "schema" => {
                let text = read_text(field).await?;
                let parsed: SchemaPart = serde_json::from_str(&text)
                    .map_err(|e| ApiError::BadRequest(format!("Invalid schema: {}", e)))?;
                form.schema = parsed.into();
            }
            "description" => form.description = read_text(field).await?,
            "target" => {
                let text = read_text(field).await?;
                form.target = match text.trim() {
                    "all" => ConvertTarget::All,
                    "selected" | "" => ConvertTarget::Selected,
                    other => {
                        return Err(ApiError::BadRequest(format!("Unknown target: {}", other)))
                    }
                };
            }
            "selected" => {
                let text = read_text(field).await?;
                let index = text
                    .trim()
                    .parse()
                    .map_err(|_| ApiError::BadRequest("selected must be a file index".into()))?;
                form.selected = Some(index);
            }
            other => tracing::debug!(part = other, "Ignoring unknown multipart field"),
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Invalid multipart field: {}", e)))
}

/// Upload documents and run extraction against the submitted schema.
///
/// Files are converted one after another in upload order; with
/// `target=all` only the last file's result is returned.
pub async fn extract_handler(
    Extension(state): Extension<AppState>,
    Query(query): Query<ExtractQuery>,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let form = read_form(multipart).await?;

    let mut session = ExtractionSession::new(state.extractor.clone());
    let file_count = form.files.len();
    session.upload(form.files);
    if let Some(index) = form.selected {
        if index >= file_count {
            return Err(ApiError::BadRequest(format!(
                "selected index {} out of range",
                index
            )));
        }
        session.select_file(index);
    }
    session.set_description(form.description);
    session.editor_mut().load(form.schema);

    let result = session.convert(form.target).await?.clone();

    match query.format {
        None => Ok(Json(result).into_response()),
        Some(format) => {
            let body = session.export(format)?;
            let disposition = format!("attachment; filename=\"{}\"", format.file_name());
            Ok((
                [
                    (header::CONTENT_TYPE, format.content_type().to_string()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                body,
            )
                .into_response())
        }
    }
}
