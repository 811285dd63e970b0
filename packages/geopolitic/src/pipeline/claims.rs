//! Claim builder: drafts lens-specific claims from that lens's sources.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::infosphere::Reference;
use crate::traits::llm::LanguageModel;
use crate::types::{Claim, Lens, PipelineState, Source};

use super::bounded;
use super::prompts::{claims_prompt, CLAIMS_SYSTEM};
use super::schema::{decode_object, lenient_string, non_empty, raw_entries, string_entries};

#[derive(Debug, Deserialize)]
struct ClaimsResponse {
    #[serde(default, deserialize_with = "raw_entries")]
    claims: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ClaimEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    text: Option<String>,
    #[serde(default, deserialize_with = "string_entries")]
    source_ids: Vec<String>,
}

/// Ask the model for claims from `lens`'s perspective, grounded in `sources`.
///
/// Entries without text are dropped. Cited ids are kept as returned.
pub async fn build_claims(
    llm: &dyn LanguageModel,
    state: &PipelineState,
    lens: Lens,
    sources: &[Source],
    references: &[Reference],
    config: &PipelineConfig,
) -> Result<Vec<Claim>> {
    info!(lens = %lens, sources = sources.len(), "Building claims");

    let user = claims_prompt(state.query(), lens, sources, references);
    let payload = bounded(
        "llm",
        config.call_timeout,
        llm.complete_json(CLAIMS_SYSTEM, &user, config.temperature),
    )
    .await?;

    let claims = parse_claims(payload)?;
    info!(lens = %lens, claims = claims.len(), "Claims built");
    Ok(claims)
}

fn parse_claims(payload: Value) -> Result<Vec<Claim>> {
    let response: ClaimsResponse = decode_object(payload)?;

    Ok(response
        .claims
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ClaimEntry>(entry).ok())
        .filter_map(|entry| Some(Claim::new(non_empty(entry.text)?, entry.source_ids)))
        .collect())
}
