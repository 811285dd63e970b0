//! Tavily-backed web searcher.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CollaboratorError, PipelineError, Result};
use crate::render::sanitize_output;
use crate::security::SecretString;
use crate::traits::searcher::{SearchDepth, SearchHit, SearchRequest, WebSearcher};

const TAVILY_ENDPOINT: &str = "https://api.tavily.com/search";

/// Tavily API request
#[derive(Debug, Serialize)]
struct TavilyRequest<'a> {
    api_key: &'a str,
    query: &'a str,
    search_depth: SearchDepth,
    max_results: usize,
}

/// Tavily API response
#[derive(Debug, Deserialize)]
struct TavilyResponse {
    #[serde(default)]
    results: Vec<SearchHit>,
}

/// Web searcher using Tavily's search API.
#[derive(Debug, Clone)]
pub struct TavilyWebSearcher {
    api_key: SecretString,
    client: reqwest::Client,
    endpoint: String,
}

impl TavilyWebSearcher {
    /// Create a searcher whose requests give up after `timeout`.
    ///
    /// A blank key is rejected here so the run fails before any stage starts.
    pub fn new(api_key: impl Into<String>, timeout: Duration) -> Result<Self> {
        let api_key = SecretString::new(api_key);
        if api_key.is_empty() {
            return Err(PipelineError::Configuration(
                "Missing TAVILY_KEY for live search.".into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PipelineError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            api_key,
            client,
            endpoint: TAVILY_ENDPOINT.to_string(),
        })
    }

    /// Point at a different search endpoint (proxies, local fakes).
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }
}

#[async_trait]
impl WebSearcher for TavilyWebSearcher {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        let body = TavilyRequest {
            api_key: self.api_key.expose(),
            query: &request.query,
            search_depth: request.search_depth,
            max_results: request.max_results,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Tavily request failed");
                CollaboratorError::Search(Box::new(e))
            })?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| CollaboratorError::Search(Box::new(e)))?;
        let text = sanitize_output(&bytes);

        if !status.is_success() {
            warn!(status = %status, "Tavily API error");
            return Err(CollaboratorError::Search(
                format!("Tavily API error {}: {}", status, text).into(),
            )
            .into());
        }

        let parsed: TavilyResponse =
            serde_json::from_str(&text).map_err(|e| CollaboratorError::MalformedResponse {
                service: "search",
                source: e,
            })?;

        debug!(results = parsed.results.len(), "Tavily search complete");
        Ok(parsed.results)
    }
}
