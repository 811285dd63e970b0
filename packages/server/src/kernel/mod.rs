//! Kernel module - collaborator construction.
//!
//! Turns a [`Config`] into a ready [`Pipeline`]: the OpenAI model and the
//! Tavily searcher behind the pipeline's collaborator traits.

use std::sync::Arc;

use anyhow::{Context, Result};
use geopolitic::{OpenAiModel, Pipeline, TavilyWebSearcher};
use openai_client::OpenAIClient;

use crate::config::Config;

/// Build the production pipeline from configuration.
pub fn build_pipeline(config: &Config) -> Result<Pipeline> {
    let mut client = OpenAIClient::new(config.openai_api_key.as_str());
    if let Some(base_url) = &config.openai_base_url {
        client = client.with_base_url(base_url.as_str());
    }
    let client = client
        .with_timeout(config.call_timeout)
        .context("Failed to create OpenAI client")?;
    let model = OpenAiModel::new(client, config.openai_model.as_str());

    let searcher = TavilyWebSearcher::new(config.tavily_api_key.as_str(), config.call_timeout)
        .context("Failed to create Tavily searcher")?;

    tracing::info!(
        model = %config.openai_model,
        parallel = config.parallel_lenses,
        timeout_secs = config.call_timeout.as_secs(),
        "Pipeline collaborators ready"
    );

    Ok(Pipeline::new(Arc::new(model))
        .with_searcher(Arc::new(searcher))
        .with_config(config.pipeline_config()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn config() -> Config {
        Config {
            openai_api_key: "sk-test".into(),
            openai_model: "gpt-4o-mini".into(),
            openai_base_url: Some("http://localhost:9999".into()),
            tavily_api_key: "tv-test".into(),
            port: 8080,
            log_level: "info".into(),
            parallel_lenses: true,
            call_timeout: Duration::from_secs(10),
        }
    }

    #[test]
    fn test_build_pipeline_applies_config() {
        let pipeline = build_pipeline(&config()).unwrap();
        assert!(pipeline.config().parallel_lenses);
        assert_eq!(pipeline.config().call_timeout, Duration::from_secs(10));
    }
}
