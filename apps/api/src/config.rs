use anyhow::{Context, Result};

use crate::extract::ExtractorCapabilities;

/// Application configuration loaded from environment variables.
/// Nothing is required: the service runs fully offline without an API key.
#[derive(Debug, Clone)]
pub struct Config {
    /// Enables the generative answer polisher when present.
    pub anthropic_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub extractor: ExtractorCapabilities,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            extractor: ExtractorCapabilities {
                pdf_extract: env_flag("ENABLE_PDF_EXTRACT", true),
                lopdf: env_flag("ENABLE_LOPDF_FALLBACK", true),
                docx: env_flag("ENABLE_DOCX", true),
            },
        })
    }
}

fn env_flag(key: &str, default: bool) -> bool {
    match std::env::var(key) {
        Ok(v) => !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"),
        Err(_) => default,
    }
}
