//! LLM prompts for the claim, fact-check and synthesis stages.

use crate::infosphere::{Infosphere, Reference};
use crate::types::{verdicts, Claim, FactCheckResult, Lens, Source};

pub const CLAIMS_SYSTEM: &str =
    "You are a political analyst who writes precise, source-grounded claims.";

pub const FACT_CHECK_SYSTEM: &str =
    "You are a meticulous fact-checker who only uses the provided sources.";

pub const SYNTHESIS_SYSTEM: &str =
    "You are a neutral methodological judge who prioritizes evidence quality.";

/// Opening of the claim task line, followed by the lens perspective.
pub const CLAIMS_TASK: &str = "Task: Provide 3-5 analytically cautious claims from the perspective:";

pub const FACT_CHECK_TASK: &str = "Task: Fact-check each claim against the sources.";

pub const SYNTHESIS_TASK: &str = "Task: Provide a neutral synthesis highlighting consensus, disputes, and strongest-supported conclusions.";

/// `{id}: {title} - {notes} ({url})`, one source per line.
pub fn source_block(sources: &[Source]) -> String {
    sources
        .iter()
        .map(|s| format!("{}: {} - {} ({})", s.id, s.title, s.notes, s.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- {name} ({url})`, one outlet per line.
pub fn reference_block(references: &[Reference]) -> String {
    references
        .iter()
        .map(|r| format!("- {} ({})", r.name, r.url))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- {text} (Sources: S1, S2)`, with `none` for uncited claims.
pub fn claims_block<'a>(claims: impl IntoIterator<Item = &'a Claim>) -> String {
    claims
        .into_iter()
        .map(|c| {
            let cite = if c.source_ids.is_empty() {
                "none".to_string()
            } else {
                c.source_ids.join(", ")
            };
            format!("- {} (Sources: {})", c.text, cite)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- {verdict}: {claim} — {rationale}`, one result per line.
pub fn fact_block(results: &[FactCheckResult]) -> String {
    results
        .iter()
        .map(|r| format!("- {}: {} — {}", r.verdict, r.claim.text, r.rationale))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn claims_prompt(
    query: &str,
    lens: Lens,
    sources: &[Source],
    references: &[Reference],
) -> String {
    format!(
        r#"Query: {query}

Sources:
{sources}

Preferred references (use for framing; do not invent citations):
{references}

{task} {perspective}.
- Use only the sources provided.
- Each claim must cite one or more source IDs.
Return JSON: {{"claims": [{{"text": "...", "source_ids": ["S1", "S2"]}}]}}."#,
        query = query,
        sources = source_block(sources),
        references = reference_block(references),
        task = CLAIMS_TASK,
        perspective = lens.perspective(),
    )
}

pub fn fact_check_prompt<'a>(
    claims: impl IntoIterator<Item = &'a Claim>,
    fact_sources: &[Source],
    references: &[Reference],
) -> String {
    format!(
        r#"Sources:
{sources}

Claims:
{claims}

Preferred fact-check references (use for methods; do not invent citations):
{references}

{task} Use verdicts: {verdicts}.
Return JSON: {{"results": [{{"claim_text": "...", "verdict": "...", "rationale": "...", "source_ids": ["S1"]}}]}}."#,
        sources = source_block(fact_sources),
        claims = claims_block(claims),
        references = reference_block(references),
        task = FACT_CHECK_TASK,
        verdicts = verdicts::ALL.join(", "),
    )
}

pub fn synthesis_prompt<'a>(
    claims: impl IntoIterator<Item = &'a Claim>,
    fact_checks: &[FactCheckResult],
    language: Infosphere,
) -> String {
    format!(
        r#"Claims:
{claims}

Fact checks:
{facts}

{task}
Write the synthesis in {language}.
Return JSON: {{"synthesis": "..."}}."#,
        claims = claims_block(claims),
        facts = fact_block(fact_checks),
        task = SYNTHESIS_TASK,
        language = language.response_language(),
    )
}
