use std::time::Duration;

use anyhow::{Context, Result};

use crate::llm_client::DEFAULT_MODEL;

/// Application configuration loaded from environment variables.
/// Every variable is optional; without `ANTHROPIC_API_KEY` only the
/// rule-based generator is available.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub anthropic_api_key: Option<String>,
    pub llm_model: String,
    pub model_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub tesseract_cmd: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            port: 8080,
            rust_log: "info".to_string(),
            anthropic_api_key: None,
            llm_model: DEFAULT_MODEL.to_string(),
            model_timeout_secs: 60,
            max_upload_bytes: 10 * 1024 * 1024,
            tesseract_cmd: "tesseract".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();
        Ok(Config {
            port: parse_or("PORT", optional_env("PORT"), defaults.port)?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            anthropic_api_key: optional_env("ANTHROPIC_API_KEY"),
            llm_model: optional_env("LLM_MODEL").unwrap_or(defaults.llm_model),
            model_timeout_secs: parse_or(
                "MODEL_TIMEOUT_SECS",
                optional_env("MODEL_TIMEOUT_SECS"),
                defaults.model_timeout_secs,
            )?,
            max_upload_bytes: parse_or(
                "MAX_UPLOAD_BYTES",
                optional_env("MAX_UPLOAD_BYTES"),
                defaults.max_upload_bytes,
            )?,
            tesseract_cmd: optional_env("TESSERACT_CMD").unwrap_or(defaults.tesseract_cmd),
        })
    }

    pub fn model_timeout(&self) -> Duration {
        Duration::from_secs(self.model_timeout_secs)
    }
}

/// Unset and blank variables both count as absent.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T>(key: &str, raw: Option<String>, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match raw {
        Some(value) => value
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{value}'")),
        None => Ok(default),
    }
}
