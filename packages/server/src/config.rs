use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub extraction_api_url: String,
    pub extraction_api_key: String,
    pub extraction_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            database_url: env::var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            extraction_api_url: env::var("EXTRACTION_API_URL")
                .context("EXTRACTION_API_URL must be set")?,
            extraction_api_key: env::var("EXTRACTION_API_KEY")
                .context("EXTRACTION_API_KEY must be set")?,
            extraction_timeout: Duration::from_secs(
                env::var("EXTRACTION_TIMEOUT_SECS")
                    .unwrap_or_else(|_| "120".to_string())
                    .parse()
                    .context("EXTRACTION_TIMEOUT_SECS must be a number of seconds")?,
            ),
        })
    }
}
