//! Testing utilities including mock implementations.
//!
//! These let applications exercise the whole pipeline without making real
//! LLM or search calls.

use async_trait::async_trait;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use std::time::Duration;

use crate::error::{CollaboratorError, Result};
use crate::pipeline::prompts::{CLAIMS_TASK, FACT_CHECK_TASK, SYNTHESIS_TASK};
use crate::traits::{
    llm::LanguageModel,
    searcher::{SearchHit, SearchRequest, WebSearcher},
};
use crate::types::Lens;

/// Which stage a prompt belongs to, recognised from its task line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PromptKind {
    Claims(Lens),
    FactCheck,
    Synthesis,
    Unknown,
}

impl PromptKind {
    pub fn classify(user: &str) -> Self {
        if user.contains(CLAIMS_TASK) {
            return Lens::ALL
                .into_iter()
                .find(|lens| user.contains(&format!("{} {}.", CLAIMS_TASK, lens.perspective())))
                .map(PromptKind::Claims)
                .unwrap_or(PromptKind::Unknown);
        }
        if user.contains(FACT_CHECK_TASK) {
            return PromptKind::FactCheck;
        }
        if user.contains(SYNTHESIS_TASK) {
            return PromptKind::Synthesis;
        }
        PromptKind::Unknown
    }
}

/// Record of a call made to the mock model.
#[derive(Debug, Clone)]
pub struct LlmCall {
    pub kind: PromptKind,
    pub system: String,
    pub user: String,
    pub temperature: f32,
}

/// A mock language model for testing.
///
/// Replies are chosen by the stage the prompt belongs to. Stages without a
/// configured reply get `{}`, which every stage reads as "nothing produced".
#[derive(Default)]
pub struct MockLanguageModel {
    /// Predefined replies by prompt kind
    replies: Arc<RwLock<HashMap<PromptKind, Value>>>,

    /// Prompt kinds that fail, with the error message
    failures: Arc<RwLock<HashMap<PromptKind, String>>>,

    /// Artificial latency before every reply
    delay: Option<Duration>,

    /// Call tracking for assertions
    calls: Arc<RwLock<Vec<LlmCall>>>,
}

impl MockLanguageModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reply for the claim prompt of one lens.
    pub fn with_claims(self, lens: Lens, reply: Value) -> Self {
        self.with_reply(PromptKind::Claims(lens), reply)
    }

    /// Reply for the fact-check prompt.
    pub fn with_fact_checks(self, reply: Value) -> Self {
        self.with_reply(PromptKind::FactCheck, reply)
    }

    /// Reply for the synthesis prompt.
    pub fn with_synthesis(self, reply: Value) -> Self {
        self.with_reply(PromptKind::Synthesis, reply)
    }

    pub fn with_reply(self, kind: PromptKind, reply: Value) -> Self {
        self.replies.write().unwrap().insert(kind, reply);
        self
    }

    /// Make prompts of `kind` fail with an LLM error.
    pub fn failing_on(self, kind: PromptKind, message: impl Into<String>) -> Self {
        self.failures.write().unwrap().insert(kind, message.into());
        self
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Get all calls made to this mock.
    pub fn calls(&self) -> Vec<LlmCall> {
        self.calls.read().unwrap().clone()
    }

    /// Calls whose prompt was of `kind`.
    pub fn calls_of(&self, kind: PromptKind) -> usize {
        self.calls
            .read()
            .unwrap()
            .iter()
            .filter(|call| call.kind == kind)
            .count()
    }
}

#[async_trait]
impl LanguageModel for MockLanguageModel {
    async fn complete_json(&self, system: &str, user: &str, temperature: f32) -> Result<Value> {
        let kind = PromptKind::classify(user);
        self.calls.write().unwrap().push(LlmCall {
            kind,
            system: system.to_string(),
            user: user.to_string(),
            temperature,
        });

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let failure = self.failures.read().unwrap().get(&kind).cloned();
        if let Some(message) = failure {
            return Err(CollaboratorError::Llm(message.into()).into());
        }

        Ok(self
            .replies
            .read()
            .unwrap()
            .get(&kind)
            .cloned()
            .unwrap_or_else(|| json!({})))
    }
}

/// A mock web searcher for testing.
///
/// Returns predefined hits by exact query, then the default hits.
#[derive(Default)]
pub struct MockWebSearcher {
    /// Predefined hits by query
    results: Arc<RwLock<HashMap<String, Vec<SearchHit>>>>,

    /// Hits for any other query
    default: Vec<SearchHit>,

    /// Fail every search with this message
    failure: Option<String>,

    /// Request tracking for assertions
    requests: Arc<RwLock<Vec<SearchRequest>>>,
}

impl MockWebSearcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_results(self, query: impl Into<String>, hits: Vec<SearchHit>) -> Self {
        self.results.write().unwrap().insert(query.into(), hits);
        self
    }

    pub fn with_default(mut self, hits: Vec<SearchHit>) -> Self {
        self.default = hits;
        self
    }

    pub fn failing(mut self, message: impl Into<String>) -> Self {
        self.failure = Some(message.into());
        self
    }

    /// Get all requests made to this mock.
    pub fn requests(&self) -> Vec<SearchRequest> {
        self.requests.read().unwrap().clone()
    }
}

#[async_trait]
impl WebSearcher for MockWebSearcher {
    async fn search(&self, request: &SearchRequest) -> Result<Vec<SearchHit>> {
        self.requests.write().unwrap().push(request.clone());

        if let Some(message) = &self.failure {
            return Err(CollaboratorError::Search(message.clone().into()).into());
        }

        Ok(self
            .results
            .read()
            .unwrap()
            .get(&request.query)
            .cloned()
            .unwrap_or_else(|| self.default.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infosphere::Infosphere;
    use crate::pipeline::prompts::{claims_prompt, fact_check_prompt, synthesis_prompt};

    #[test]
    fn test_classify_prompts() {
        for lens in Lens::ALL {
            assert_eq!(
                PromptKind::classify(&claims_prompt("q", lens, &[], &[])),
                PromptKind::Claims(lens)
            );
        }
        assert_eq!(
            PromptKind::classify(&fact_check_prompt(std::iter::empty(), &[], &[])),
            PromptKind::FactCheck
        );
        assert_eq!(
            PromptKind::classify(&synthesis_prompt(std::iter::empty(), &[], Infosphere::English)),
            PromptKind::Synthesis
        );
        assert_eq!(PromptKind::classify("hello"), PromptKind::Unknown);
    }

    #[tokio::test]
    async fn test_mock_model_records_and_fails() {
        let llm = MockLanguageModel::new()
            .with_synthesis(json!({"synthesis": "ok"}))
            .failing_on(PromptKind::FactCheck, "boom");

        let reply = llm
            .complete_json("sys", &synthesis_prompt(std::iter::empty(), &[], Infosphere::English), 0.2)
            .await
            .unwrap();
        assert_eq!(reply, json!({"synthesis": "ok"}));

        let err = llm
            .complete_json("sys", &fact_check_prompt(std::iter::empty(), &[], &[]), 0.2)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("boom"));

        assert_eq!(llm.calls().len(), 2);
        assert_eq!(llm.calls_of(PromptKind::Synthesis), 1);
    }

    #[tokio::test]
    async fn test_mock_searcher_routes_by_query() {
        let searcher = MockWebSearcher::new()
            .with_results("a", vec![SearchHit::new("https://a.test")])
            .with_default(vec![]);

        assert_eq!(searcher.search(&SearchRequest::new("a")).await.unwrap().len(), 1);
        assert!(searcher.search(&SearchRequest::new("b")).await.unwrap().is_empty());
        assert_eq!(searcher.requests().len(), 2);
    }
}
