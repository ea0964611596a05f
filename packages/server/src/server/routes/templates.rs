use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    Json,
};
use extraction_studio::{
    save_template, save_template_as, update_template_by_id, ExtractionSchema, LoadedTemplate,
    SaveOutcome, SaveTemplate, Template,
};
use serde::{Deserialize, Serialize};

use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiJson};

#[derive(Debug, Deserialize)]
pub struct SaveTemplateRequest {
    /// Missing names are rejected by the save rules, not by deserialization.
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub extraction_schema: ExtractionSchema,
    /// Template the schema was loaded from, if any.
    #[serde(default)]
    pub loaded_template: Option<LoadedTemplate>,
}

#[derive(Debug, Deserialize)]
pub struct TemplateBody {
    #[serde(default)]
    pub template_name: String,
    #[serde(default)]
    pub extraction_schema: ExtractionSchema,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Created,
    Updated,
}

#[derive(Debug, Serialize)]
pub struct SaveTemplateResponse {
    pub outcome: Outcome,
    pub template: Template,
}

pub async fn list_templates_handler(
    Extension(state): Extension<AppState>,
) -> Result<Json<Vec<Template>>, ApiError> {
    let templates = state.store.list_templates().await?;
    Ok(Json(templates))
}

/// Reconciling save: updates the loaded template when the name is unchanged,
/// inserts otherwise.
pub async fn save_template_handler(
    Extension(state): Extension<AppState>,
    ApiJson(request): ApiJson<SaveTemplateRequest>,
) -> Result<(StatusCode, Json<SaveTemplateResponse>), ApiError> {
    let outcome = save_template(
        state.store.as_ref(),
        SaveTemplate {
            name: request.template_name,
            schema: request.extraction_schema,
            loaded: request.loaded_template,
        },
    )
    .await?;

    let (status, response) = match outcome {
        SaveOutcome::Created(template) => (
            StatusCode::CREATED,
            SaveTemplateResponse {
                outcome: Outcome::Created,
                template,
            },
        ),
        SaveOutcome::Updated(template) => (
            StatusCode::OK,
            SaveTemplateResponse {
                outcome: Outcome::Updated,
                template,
            },
        ),
    };
    Ok((status, Json(response)))
}

pub async fn save_template_as_handler(
    Extension(state): Extension<AppState>,
    ApiJson(body): ApiJson<TemplateBody>,
) -> Result<(StatusCode, Json<Template>), ApiError> {
    let template = save_template_as(
        state.store.as_ref(),
        &body.template_name,
        &body.extraction_schema,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(template)))
}

pub async fn update_template_handler(
    Extension(state): Extension<AppState>,
    Path(template_id): Path<i64>,
    ApiJson(body): ApiJson<TemplateBody>,
) -> Result<Json<Template>, ApiError> {
    let template = update_template_by_id(
        state.store.as_ref(),
        template_id,
        &body.template_name,
        &body.extraction_schema,
    )
    .await?;
    Ok(Json(template))
}
