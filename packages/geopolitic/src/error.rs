//! Typed errors for the pipeline.
//!
//! Uses `thiserror` for library errors (not `anyhow`) so callers can tell a
//! missing credential from a failed collaborator or a bad request.

use std::time::Duration;

use thiserror::Error;

/// Errors that abort a pipeline run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// A required credential or setting is missing
    #[error("configuration error: {0}")]
    Configuration(String),

    /// The search or LLM collaborator failed
    #[error(transparent)]
    Collaborator(#[from] CollaboratorError),

    /// Caller input was rejected before any stage ran
    #[error("invalid request: {0}")]
    Validation(String),

    /// A stage tried to overwrite a field another stage already produced
    #[error("state field `{field}` was already populated")]
    StateConflict { field: &'static str },
}

/// Failures of the external services the pipeline talks to.
#[derive(Debug, Error)]
pub enum CollaboratorError {
    /// Search request failed (transport, auth, rate limit, bad envelope)
    #[error("search failed: {0}")]
    Search(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// LLM request failed (transport, auth, rate limit, empty reply)
    #[error("LLM call failed: {0}")]
    Llm(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// The service answered, but not with parseable JSON
    #[error("{service} returned malformed JSON: {source}")]
    MalformedResponse {
        service: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The call did not finish within the configured bound
    #[error("{service} call timed out after {after:?}")]
    Timeout {
        service: &'static str,
        after: Duration,
    },
}

impl PipelineError {
    /// Whether the caller sent something unusable.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
