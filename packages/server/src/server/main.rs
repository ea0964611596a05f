// Main entry point for the studio API server

use std::sync::Arc;

use anyhow::{Context, Result};
use extract_client::ExtractClient;
use extraction_studio::PostgresStore;
use sqlx::postgres::PgPoolOptions;
use studio_server::{
    server::{build_app, AppState},
    Config,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,studio_server=debug,extraction_studio=debug,sqlx=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Extraction Studio API");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded");

    tracing::info!("Connecting to database...");
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Creates tables on first start
    let store = PostgresStore::from_pool(pool.clone())
        .await
        .context("Failed to prepare database tables")?;

    let extractor = ExtractClient::new(&config.extraction_api_url, &config.extraction_api_key)
        .with_timeout(config.extraction_timeout)
        .context("Failed to build extraction client")?;
    tracing::info!(base_url = extractor.base_url(), "Extraction client ready");

    let app = build_app(AppState {
        store: Arc::new(store),
        extractor: Arc::new(extractor),
        db_pool: Some(pool),
    });

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("Starting server on {}", addr);
    tracing::info!("Health check: http://localhost:{}/health", config.port);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .context("Failed to bind to address")?;

    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
