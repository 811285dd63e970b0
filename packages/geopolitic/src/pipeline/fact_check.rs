//! Fact checker: verdicts on the claims of every lens.

use serde::Deserialize;
use serde_json::Value;
use tracing::info;

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::infosphere::Reference;
use crate::traits::llm::LanguageModel;
use crate::types::{Claim, FactCheckResult, PipelineState, Source};

use super::bounded;
use super::prompts::{fact_check_prompt, FACT_CHECK_SYSTEM};
use super::schema::{decode_object, lenient_string, non_empty, raw_entries, string_entries};

#[derive(Debug, Deserialize)]
struct FactCheckResponse {
    #[serde(default, deserialize_with = "raw_entries")]
    results: Vec<Value>,
}

#[derive(Debug, Deserialize)]
struct ResultEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    claim_text: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    verdict: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    rationale: Option<String>,
    #[serde(default, deserialize_with = "string_entries")]
    source_ids: Vec<String>,
}

impl ResultEntry {
    fn into_result(self) -> Option<FactCheckResult> {
        let text = non_empty(self.claim_text)?;
        let verdict = non_empty(self.verdict)?;
        Some(FactCheckResult {
            claim: Claim::new(text, self.source_ids),
            verdict,
            rationale: non_empty(self.rationale).unwrap_or_default(),
        })
    }
}

/// Check all lens claims, in lens order, against `fact_sources`.
///
/// The result count need not match the claim count. Verdicts are taken
/// as written by the model.
pub async fn fact_check(
    llm: &dyn LanguageModel,
    state: &PipelineState,
    fact_sources: &[Source],
    references: &[Reference],
    config: &PipelineConfig,
) -> Result<Vec<FactCheckResult>> {
    info!(
        claims = state.all_claims().count(),
        sources = fact_sources.len(),
        "Fact checking"
    );

    let user = fact_check_prompt(state.all_claims(), fact_sources, references);
    let payload = bounded(
        "llm",
        config.call_timeout,
        llm.complete_json(FACT_CHECK_SYSTEM, &user, config.temperature),
    )
    .await?;

    let results = parse_results(payload)?;
    info!(results = results.len(), "Fact check complete");
    Ok(results)
}

fn parse_results(payload: Value) -> Result<Vec<FactCheckResult>> {
    let response: FactCheckResponse = decode_object(payload)?;

    Ok(response
        .results
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ResultEntry>(entry).ok())
        .filter_map(ResultEntry::into_result)
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infosphere::Infosphere;
    use crate::testing::MockLanguageModel;
    use crate::types::{Lens, StateUpdate};
    use serde_json::json;

    #[test]
    fn test_entries_need_text_and_verdict() {
        let results = parse_results(json!({
            "results": [
                {"claim_text": "", "verdict": "TRUE"},
                {"claim_text": "No verdict", "verdict": "  "},
                {"claim_text": " Wind is cheap ", "verdict": " TRUE ", "source_ids": ["S1"]},
                {"claim_text": "Odd verdict", "verdict": "UNSURE", "rationale": " thin evidence "}
            ]
        }))
        .unwrap();

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].claim, Claim::new("Wind is cheap", vec!["S1".into()]));
        assert_eq!(results[0].verdict, "TRUE");
        assert_eq!(results[0].rationale, "");
        assert_eq!(results[1].verdict, "UNSURE");
        assert_eq!(results[1].rationale, "thin evidence");
    }

    #[test]
    fn test_wrongly_typed_entries_are_dropped() {
        let results = parse_results(json!({
            "results": [null, "TRUE", {"claim_text": 1, "verdict": "TRUE"}]
        }))
        .unwrap();
        assert!(results.is_empty());
    }

    #[tokio::test]
    async fn test_claims_of_every_lens_are_sent_in_order() {
        let mut state = PipelineState::new("q", Infosphere::English);
        for lens in [Lens::People, Lens::Left, Lens::Right, Lens::Centrist] {
            state = state
                .apply(StateUpdate::Claims(
                    lens,
                    vec![Claim::new(format!("{} claim", lens), Vec::new())],
                ))
                .unwrap();
        }
        let llm = MockLanguageModel::new().with_fact_checks(json!({"results": []}));

        let results = fact_check(&llm, &state, &[], &[], &PipelineConfig::default())
            .await
            .unwrap();

        assert!(results.is_empty());
        let user = &llm.calls()[0].user;
        assert!(user.contains(
            "- left claim (Sources: none)\n- centrist claim (Sources: none)\n\
             - right claim (Sources: none)\n- people claim (Sources: none)"
        ));
    }
}
