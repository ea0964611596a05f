use axum::{extract::Extension, http::StatusCode, Json};
use extraction_studio::SchemaSnapshot;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::app::AppState;
use crate::server::error::{ApiError, ApiJson};

#[derive(Debug, Deserialize)]
pub struct SaveSchemaRequest {
    #[serde(default)]
    pub schema: Value,
}

/// Store a raw schema blob. Not tied to any template.
pub async fn save_schema_handler(
    Extension(state): Extension<AppState>,
    ApiJson(request): ApiJson<SaveSchemaRequest>,
) -> Result<Json<SchemaSnapshot>, ApiError> {
    let snapshot = state.store.save_snapshot(&request.schema).await.map_err(|e| {
        tracing::error!(error = %e, "Error saving schema");
        ApiError::Internal("Error saving schema".to_string())
    })?;
    tracing::info!(snapshot_id = snapshot.snapshot_id, "Schema snapshot saved");
    Ok(Json(snapshot))
}

pub async fn method_not_allowed() -> (StatusCode, Json<Value>) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(json!({ "message": "Method not allowed" })),
    )
}
