//! Multi-perspective research pipeline
//!
//! Given a query, the pipeline gathers sources biased toward four lenses
//! (left, centrist, right, people), asks a language model for claims per
//! lens, fact-checks those claims against a separate source pool, writes a
//! neutral synthesis and renders everything into one report.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use geopolitic::{Infosphere, Pipeline};
//! use geopolitic::testing::{MockLanguageModel, MockWebSearcher};
//!
//! let pipeline = Pipeline::new(Arc::new(MockLanguageModel::new()))
//!     .with_searcher(Arc::new(MockWebSearcher::new()));
//!
//! let report = pipeline.run("energy policy", None, Infosphere::English).await?;
//! ```
//!
//! # Modules
//!
//! - [`types`] - Sources, claims, verdicts and the pipeline state
//! - [`traits`] - Collaborator abstractions (LanguageModel, WebSearcher)
//! - [`pipeline`] - Stages and the orchestrator
//! - [`render`] - Report formatting
//! - [`infosphere`] - Reference outlets and report language
//! - [`searchers`] - Web searcher implementations (Tavily)
//! - [`security`] - Credential handling
//! - [`testing`] - Mock implementations for testing

pub mod config;
pub mod error;
pub mod infosphere;
pub mod pipeline;
pub mod render;
pub mod searchers;
pub mod security;
pub mod testing;
pub mod traits;
pub mod types;

#[cfg(feature = "openai")]
pub mod ai;

// Re-export core types at crate root
pub use config::PipelineConfig;
pub use error::{CollaboratorError, PipelineError, Result};
pub use infosphere::{Infosphere, Reference, ReferenceSet};
pub use pipeline::{Pipeline, Stage};
pub use render::{merge_sources, render_report, sanitize_output, SectionLabels};
pub use searchers::TavilyWebSearcher;
pub use security::SecretString;
pub use traits::{
    llm::LanguageModel,
    searcher::{SearchDepth, SearchHit, SearchRequest, WebSearcher},
};
pub use types::{
    verdicts, Claim, FactCheckResult, Lens, PipelineState, SearchScope, SeedSources, Source,
    StateUpdate,
};

#[cfg(feature = "openai")]
pub use ai::OpenAiModel;
