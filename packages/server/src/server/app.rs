//! Application setup and server configuration.

use std::sync::Arc;

use axum::{
    extract::{DefaultBodyLimit, Extension},
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method,
    },
    routing::{get, post, put},
    Router,
};
use extraction_studio::{Extractor, StudioStore};
use sqlx::PgPool;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::server::routes::{
    extract_handler, health_handler, list_templates_handler, method_not_allowed,
    save_schema_handler, save_template_as_handler, save_template_handler,
    update_template_handler,
};

/// Uploaded documents travel in the request body.
const MAX_BODY_BYTES: usize = 50 * 1024 * 1024;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn StudioStore>,
    pub extractor: Arc<dyn Extractor>,
    /// Present when backed by Postgres; used by the health check.
    pub db_pool: Option<PgPool>,
}

/// Build the Axum application router
pub fn build_app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::OPTIONS])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    Router::new()
        .route("/health", get(health_handler))
        .route(
            "/api/schema",
            post(save_schema_handler).fallback(method_not_allowed),
        )
        .route(
            "/api/templates",
            get(list_templates_handler).post(save_template_handler),
        )
        .route("/api/templates/new", post(save_template_as_handler))
        .route("/api/templates/:id", put(update_template_handler))
        .route("/api/extract", post(extract_handler))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(Extension(state))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}
