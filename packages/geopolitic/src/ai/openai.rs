//! OpenAI implementation of the `LanguageModel` trait.
//!
//! # Example
//!
//! ```rust,ignore
//! use geopolitic::ai::OpenAiModel;
//! use openai_client::OpenAIClient;
//!
//! let model = OpenAiModel::new(OpenAIClient::from_env()?, "gpt-4o-mini");
//! let pipeline = Pipeline::new(Arc::new(model));
//! ```

use async_trait::async_trait;
use openai_client::{OpenAIClient, OpenAIError};
use tracing::info;

use crate::error::{CollaboratorError, PipelineError, Result};
use crate::traits::llm::LanguageModel;

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// JSON-mode chat completions through [`OpenAIClient`].
#[derive(Debug, Clone)]
pub struct OpenAiModel {
    client: OpenAIClient,
    model: String,
}

impl OpenAiModel {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl LanguageModel for OpenAiModel {
    async fn complete_json(
        &self,
        system: &str,
        user: &str,
        temperature: f32,
    ) -> Result<serde_json::Value> {
        info!(model = %self.model, temperature, "LLM request");

        let content = self
            .client
            .chat_json(&self.model, system, user, temperature)
            .await
            .map_err(into_pipeline_error)?;

        let payload = parse_payload(&content)?;
        info!(model = %self.model, "LLM response received");
        Ok(payload)
    }
}

fn into_pipeline_error(error: OpenAIError) -> PipelineError {
    if error.is_config() {
        PipelineError::Configuration(error.to_string())
    } else {
        CollaboratorError::Llm(Box::new(error)).into()
    }
}

/// Parse model content as JSON. No repair is attempted.
fn parse_payload(content: &str) -> Result<serde_json::Value> {
    serde_json::from_str(content).map_err(|e| {
        CollaboratorError::MalformedResponse {
            service: "llm",
            source: e,
        }
        .into()
    })
}
