//! Searcher stage: sources for one scope, from a seed or a live search.

use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};
use crate::infosphere::Reference;
use crate::traits::searcher::{SearchHit, SearchRequest, WebSearcher};
use crate::types::{PipelineState, SearchScope, SeedSources, Source};

use super::bounded;

const UNTITLED: &str = "Untitled";
const NO_SUMMARY: &str = "No summary provided.";

/// Gather sources for `scope`.
///
/// A non-empty seed for the scope is returned as is, without touching the
/// searcher. Otherwise one biased query goes to `searcher`; if none is
/// configured the run fails with a configuration error.
pub async fn search(
    searcher: Option<&dyn WebSearcher>,
    state: &PipelineState,
    scope: SearchScope,
    references: &[Reference],
    seed: Option<&SeedSources>,
    config: &PipelineConfig,
) -> Result<Vec<Source>> {
    if let Some(seeded) = seed.and_then(|s| s.for_scope(scope)) {
        info!(scope = %scope, sources = seeded.len(), "Web searcher: using seed sources");
        return Ok(seeded.to_vec());
    }

    let searcher = searcher.ok_or_else(|| {
        PipelineError::Configuration("Missing TAVILY_KEY for live search.".into())
    })?;

    info!(scope = %scope, "Web searcher: querying search provider");
    let request = SearchRequest::new(biased_query(state.query(), references))
        .with_max_results(config.max_results)
        .with_search_depth(config.search_depth);

    let hits = bounded("search", config.call_timeout, searcher.search(&request)).await?;
    let sources: Vec<Source> = hits
        .into_iter()
        .enumerate()
        .map(|(idx, hit)| to_source(idx + 1, hit, config.notes_limit))
        .collect();

    for source in &sources {
        debug!(scope = %scope, title = %source.title, url = %source.url, "Web searcher: source");
    }
    info!(scope = %scope, sources = sources.len(), "Web searcher: received sources");

    Ok(sources)
}

/// Append a `site:` disjunction over the reference outlets to the query.
pub fn biased_query(query: &str, references: &[Reference]) -> String {
    if references.is_empty() {
        return query.to_string();
    }

    let sites = references
        .iter()
        .map(|r| {
            let host = r
                .url
                .strip_prefix("https://")
                .or_else(|| r.url.strip_prefix("http://"))
                .unwrap_or(&r.url);
            format!("site:{}", host)
        })
        .collect::<Vec<_>>()
        .join(" OR ");

    format!("{} ({})", query, sites)
}

fn to_source(position: usize, hit: SearchHit, notes_limit: usize) -> Source {
    let title = hit
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| UNTITLED.to_string());
    let url = hit.url.map(|u| u.trim().to_string()).unwrap_or_default();

    Source {
        id: format!("S{}", position),
        title,
        url,
        notes: summarize_notes(hit.content.as_deref().unwrap_or(""), notes_limit),
    }
}

/// Collapse whitespace and cut to `limit` characters.
pub fn summarize_notes(content: &str, limit: usize) -> String {
    let collapsed = content.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        return NO_SUMMARY.to_string();
    }
    collapsed.chars().take(limit).collect()
}
