use anyhow::{bail, Context, Result};
use dotenvy::dotenv;
use geopolitic::PipelineConfig;
use std::env;
use std::time::Duration;

/// Variables without which the service cannot start.
pub const REQUIRED_ENV_VARS: [&str; 2] = ["OPENAI_API_KEY", "TAVILY_KEY"];

const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_model: String,
    pub openai_base_url: Option<String>,
    pub tavily_api_key: String,
    pub port: u16,
    pub log_level: String,
    pub parallel_lenses: bool,
    pub call_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from any key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        check_required(&value, &REQUIRED_ENV_VARS)?;

        Ok(Self {
            openai_api_key: value("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?,
            openai_model: value("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            openai_base_url: value("OPENAI_BASE_URL"),
            tavily_api_key: resolve(&value, "TAVILY_KEY").context("TAVILY_KEY must be set")?,
            port: value("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            log_level: value("LOG_LEVEL")
                .unwrap_or_else(|| "info".to_string())
                .to_lowercase(),
            parallel_lenses: value("PIPELINE_PARALLEL")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("PIPELINE_PARALLEL must be true or false")?
                .unwrap_or(false),
            call_timeout: Duration::from_secs(
                value("PIPELINE_CALL_TIMEOUT_SECS")
                    .unwrap_or_else(|| "120".to_string())
                    .parse()
                    .context("PIPELINE_CALL_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
        })
    }

    /// Library-side settings derived from this configuration.
    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig::default()
            .with_call_timeout(self.call_timeout)
            .with_parallel_lenses(self.parallel_lenses)
    }
}

fn check_required(value: &dyn Fn(&str) -> Option<String>, keys: &[&str]) -> Result<()> {
    let missing: Vec<&str> = keys
        .iter()
        .copied()
        .filter(|key| resolve(value, key).is_none())
        .collect();

    if !missing.is_empty() {
        bail!(
            "Missing required environment variables: {}",
            missing.join(", ")
        );
    }
    Ok(())
}

/// `TAVILY_API_KEY` is accepted in place of `TAVILY_KEY`.
fn resolve(value: &dyn Fn(&str) -> Option<String>, key: &str) -> Option<String> {
    match key {
        "TAVILY_KEY" => value(key).or_else(|| value("TAVILY_API_KEY")),
        _ => value(key),
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => bail!("invalid flag value: {}", other),
    }
}
