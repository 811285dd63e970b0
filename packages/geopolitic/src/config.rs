//! Pipeline tunables.

use std::time::Duration;

use crate::traits::searcher::SearchDepth;

/// Settings shared by every stage of a run.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    /// Sampling temperature for every model call.
    pub temperature: f32,

    /// Results requested per live search.
    pub max_results: usize,

    pub search_depth: SearchDepth,

    /// Maximum characters kept from a search result's content.
    pub notes_limit: usize,

    /// Upper bound for a single search or model call.
    pub call_timeout: Duration,

    /// Run the four lens branches concurrently.
    pub parallel_lenses: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            max_results: 6,
            search_depth: SearchDepth::Advanced,
            notes_limit: 240,
            call_timeout: Duration::from_secs(120),
            parallel_lenses: false,
        }
    }
}

impl PipelineConfig {
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    pub fn with_search_depth(mut self, depth: SearchDepth) -> Self {
        self.search_depth = depth;
        self
    }

    pub fn with_call_timeout(mut self, timeout: Duration) -> Self {
        self.call_timeout = timeout;
        self
    }

    pub fn with_parallel_lenses(mut self, parallel: bool) -> Self {
        self.parallel_lenses = parallel;
        self
    }
}
