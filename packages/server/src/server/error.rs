//! API error type mapped to HTTP status codes.
//!
//! Bodies use `{"message": "..."}`, the same shape the extraction service
//! uses for its own failures, so a front-end can show either one directly.

use axum::extract::rejection::JsonRejection;
use axum::extract::FromRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use extraction_studio::StudioError;
use serde_json::json;

#[derive(Debug)]
pub enum ApiError {
    /// Invalid request or failed precondition (400).
    BadRequest(String),
    /// Unknown resource (404).
    NotFound(String),
    /// Name already taken (409).
    Conflict(String),
    /// Extraction service failed (502).
    BadGateway(String),
    /// Unexpected server error (500).
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::BadGateway(msg) => (StatusCode::BAD_GATEWAY, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };
        (status, Json(json!({ "message": message }))).into_response()
    }
}

/// JSON body extractor whose rejections use the `{"message": ...}` shape.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}

impl From<StudioError> for ApiError {
    fn from(err: StudioError) -> Self {
        match err {
            StudioError::Validation(msg) => ApiError::BadRequest(msg),
            StudioError::DuplicateName { .. } => {
                ApiError::Conflict("A template with this name already exists".to_string())
            }
            StudioError::TemplateNotFound { template_id } => {
                ApiError::NotFound(format!("Template {} not found", template_id))
            }
            StudioError::Extract(e) => {
                tracing::warn!(error = %e, "Extraction call failed");
                ApiError::BadGateway(e.user_message().to_string())
            }
            other => {
                tracing::error!(error = %other, "Request failed");
                ApiError::Internal("Internal server error".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use extract_client::ExtractError;

    #[test]
    fn test_status_mapping() {
        let cases = [
            (StudioError::validation("x"), StatusCode::BAD_REQUEST),
            (StudioError::DuplicateName { name: "a".into() }, StatusCode::CONFLICT),
            (StudioError::TemplateNotFound { template_id: 1 }, StatusCode::NOT_FOUND),
            (
                StudioError::Extract(ExtractError::Api { status: 500, message: "m".into() }),
                StatusCode::BAD_GATEWAY,
            ),
            (StudioError::storage("down"), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, status) in cases {
            assert_eq!(ApiError::from(err).into_response().status(), status);
        }
    }
}
