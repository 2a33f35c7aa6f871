//! Environment-driven configuration.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use crate::error::{DzhrError, DzhrResult};
use crate::generate::{DEFAULT_MAX_OUTPUT_TOKENS, GenerationOptions};
use crate::llm::{OpenAiClient, TextGenerator, UnconfiguredGenerator, openai};
use crate::validate::{DEFAULT_THRESHOLD, ResponseValidator};

pub const DEFAULT_REDIS_URL: &str = "redis://127.0.0.1:6379";

/// Runtime configuration read once at startup.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub openai_api_key: Option<String>,
    pub openai_base_url: Option<String>,
    pub model: String,
    pub max_output_tokens: u32,
    pub generation_timeout: Option<Duration>,
    pub malformed_retries: u32,
    pub quality_threshold: u8,
    pub figma_api_key: Option<String>,
    pub redis_url: String,
    pub chromium_path: Option<PathBuf>,
    pub browser_no_sandbox: bool,
}

impl AppConfig {
    /// Read the configuration from the process environment.
    ///
    /// `OPENAI_API_KEY` is optional here; without it every model call fails
    /// with a configuration error while storage and scraping keep working.
    pub fn from_env() -> DzhrResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary key lookup. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> DzhrResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            openai_api_key: get("OPENAI_API_KEY"),
            openai_base_url: get("OPENAI_BASE_URL"),
            model: get("DZHR_MODEL").unwrap_or_else(|| openai::DEFAULT_MODEL.to_string()),
            max_output_tokens: parse_or(get("DZHR_MAX_OUTPUT_TOKENS"), "DZHR_MAX_OUTPUT_TOKENS", DEFAULT_MAX_OUTPUT_TOKENS)?,
            generation_timeout: get("DZHR_GENERATION_TIMEOUT_SECS")
                .map(|v| parse_value::<u64>(&v, "DZHR_GENERATION_TIMEOUT_SECS"))
                .transpose()?
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs),
            malformed_retries: parse_or(get("DZHR_MALFORMED_RETRIES"), "DZHR_MALFORMED_RETRIES", 1)?,
            quality_threshold: parse_or(get("DZHR_QUALITY_THRESHOLD"), "DZHR_QUALITY_THRESHOLD", DEFAULT_THRESHOLD)?,
            figma_api_key: get("FIGMA_API_KEY"),
            redis_url: get("REDIS_URL").unwrap_or_else(|| DEFAULT_REDIS_URL.to_string()),
            chromium_path: get("CHROMIUM_PATH").map(PathBuf::from),
            browser_no_sandbox: get("DZHR_BROWSER_NO_SANDBOX")
                .map(|v| matches!(v.to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
                .unwrap_or(false),
        })
    }

    pub fn generation_options(&self) -> GenerationOptions {
        GenerationOptions {
            max_output_tokens: self.max_output_tokens,
            malformed_retries: self.malformed_retries,
            timeout: self.generation_timeout,
            validator: ResponseValidator::new(self.quality_threshold),
        }
    }

    /// Fail unless a model API key is configured.
    pub fn require_openai_key(&self) -> DzhrResult<&str> {
        self.openai_api_key
            .as_deref()
            .ok_or_else(|| DzhrError::config("OPENAI_API_KEY is not set"))
    }

    /// The text generator backing generation, refinement and analysis.
    pub fn text_generator(&self) -> Arc<dyn TextGenerator> {
        let Some(key) = &self.openai_api_key else {
            return Arc::new(UnconfiguredGenerator::new("OPENAI_API_KEY"));
        };
        let mut client = OpenAiClient::new(key, &self.model);
        if let Some(base) = &self.openai_base_url {
            client = client.with_base_url(base);
        }
        Arc::new(client)
    }
}

fn parse_value<T: std::str::FromStr>(value: &str, key: &str) -> DzhrResult<T> {
    value
        .parse()
        .map_err(|_| DzhrError::config(format!("{} has an invalid value: {}", key, value)))
}

fn parse_or<T: std::str::FromStr>(value: Option<String>, key: &str, default: T) -> DzhrResult<T> {
    match value {
        Some(v) => parse_value(&v, key),
        None => Ok(default),
    }
}
