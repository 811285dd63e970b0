//! Synthesizer: one neutral summary over all claims and verdicts.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::traits::llm::LanguageModel;
use crate::types::PipelineState;

use super::bounded;
use super::prompts::{synthesis_prompt, SYNTHESIS_SYSTEM};
use super::schema::{decode_object, lenient_string, non_empty};

#[derive(Debug, Deserialize)]
struct SynthesisResponse {
    #[serde(default, deserialize_with = "lenient_string")]
    synthesis: Option<String>,
}

/// Write the synthesis in the run's language. Empty when the model omits it.
pub async fn synthesize(
    llm: &dyn LanguageModel,
    state: &PipelineState,
    config: &PipelineConfig,
) -> Result<String> {
    info!(
        fact_checks = state.fact_checks().len(),
        language = %state.language(),
        "Summarizing"
    );

    let user = synthesis_prompt(state.all_claims(), state.fact_checks(), state.language());
    let payload = bounded(
        "llm",
        config.call_timeout,
        llm.complete_json(SYNTHESIS_SYSTEM, &user, config.temperature),
    )
    .await?;

    parse_synthesis(payload)
}

fn parse_synthesis(payload: Value) -> Result<String> {
    let response: SynthesisResponse = decode_object(payload)?;
    Ok(non_empty(response.synthesis).unwrap_or_default())
}
