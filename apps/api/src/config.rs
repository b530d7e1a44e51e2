use std::str::FromStr;
use std::time::Duration;

use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Enables the LLM enrichment backend when present.
    pub anthropic_api_key: Option<String>,
    pub enable_ai_enrichment: bool,
    pub enrichment_timeout: Duration,
    pub max_batch_size: usize,
    pub max_text_chars: usize,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key → value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Config {
            port: parse_or(&lookup, "PORT", 8080)?,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
            anthropic_api_key: lookup("ANTHROPIC_API_KEY").filter(|k| !k.trim().is_empty()),
            enable_ai_enrichment: parse_or(&lookup, "ENABLE_AI_ENRICHMENT", true)?,
            enrichment_timeout: Duration::from_secs(parse_or(
                &lookup,
                "ENRICHMENT_TIMEOUT_SECS",
                20,
            )?),
            max_batch_size: parse_or(&lookup, "MAX_BATCH_SIZE", 25)?,
            max_text_chars: parse_or(&lookup, "MAX_TEXT_CHARS", 50_000)?,
        })
    }

    /// Enrichment runs only when it is switched on and an API key is available.
    pub fn enrichment_enabled(&self) -> bool {
        self.enable_ai_enrichment && self.anthropic_api_key.is_some()
    }
}

fn parse_or<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("Environment variable '{key}' has an invalid value '{raw}'")),
    }
}
