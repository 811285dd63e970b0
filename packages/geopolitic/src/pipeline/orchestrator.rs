//! Fixed-order stage chain.
//!
//! ```text
//! left_search -> left_claims -> centrist_search -> centrist_claims ->
//! right_search -> right_claims -> people_search -> people_claims ->
//! fact_search -> fact_check -> synthesize -> render
//! ```
//!
//! Each stage turns one state snapshot into the next through a single
//! [`StateUpdate`]. Any failure aborts the run; there is no partial report.

use std::fmt;
use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, info};

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::infosphere::{Infosphere, ReferenceSet};
use crate::render::{render_report, SectionLabels};
use crate::traits::llm::LanguageModel;
use crate::traits::searcher::WebSearcher;
use crate::types::{Claim, Lens, PipelineState, SearchScope, SeedSources, Source, StateUpdate};

use super::{build_claims, fact_check, search, synthesize};

/// One node of the chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Search(SearchScope),
    Claims(Lens),
    FactCheck,
    Synthesize,
    Render,
}

impl Stage {
    pub const FIRST: Stage = Stage::Search(SearchScope::Left);

    /// The stage that runs after this one; `None` after rendering.
    pub fn next(self) -> Option<Stage> {
        let next = match self {
            Stage::Search(SearchScope::Left) => Stage::Claims(Lens::Left),
            Stage::Claims(Lens::Left) => Stage::Search(SearchScope::Centrist),
            Stage::Search(SearchScope::Centrist) => Stage::Claims(Lens::Centrist),
            Stage::Claims(Lens::Centrist) => Stage::Search(SearchScope::Right),
            Stage::Search(SearchScope::Right) => Stage::Claims(Lens::Right),
            Stage::Claims(Lens::Right) => Stage::Search(SearchScope::People),
            Stage::Search(SearchScope::People) => Stage::Claims(Lens::People),
            Stage::Claims(Lens::People) => Stage::Search(SearchScope::Fact),
            Stage::Search(SearchScope::Fact) => Stage::FactCheck,
            Stage::FactCheck => Stage::Synthesize,
            Stage::Synthesize => Stage::Render,
            Stage::Render => return None,
        };
        Some(next)
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Search(scope) => write!(f, "{}_search", scope),
            Stage::Claims(lens) => write!(f, "{}_claims", lens),
            Stage::FactCheck => f.write_str("fact_check"),
            Stage::Synthesize => f.write_str("synthesize"),
            Stage::Render => f.write_str("render"),
        }
    }
}

/// Per-run inputs that stay fixed while stages execute.
struct RunContext<'a> {
    references: ReferenceSet,
    labels: SectionLabels,
    seed: Option<&'a SeedSources>,
}

/// The research pipeline with its collaborators.
///
/// # Example
///
/// ```rust,ignore
/// let pipeline = Pipeline::new(Arc::new(model))
///     .with_searcher(Arc::new(tavily))
///     .with_config(PipelineConfig::default().with_parallel_lenses(true));
///
/// let report = pipeline.run("energy policy", None, Infosphere::English).await?;
/// ```
#[derive(Clone)]
pub struct Pipeline {
    llm: Arc<dyn LanguageModel>,
    searcher: Option<Arc<dyn WebSearcher>>,
    config: PipelineConfig,
}

impl Pipeline {
    /// A pipeline without a searcher. Runs must then be fully seeded.
    pub fn new(llm: Arc<dyn LanguageModel>) -> Self {
        Self {
            llm,
            searcher: None,
            config: PipelineConfig::default(),
        }
    }

    pub fn with_searcher(mut self, searcher: Arc<dyn WebSearcher>) -> Self {
        self.searcher = Some(searcher);
        self
    }

    pub fn with_config(mut self, config: PipelineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Run every stage and return the rendered report.
    pub async fn run(
        &self,
        query: &str,
        seed: Option<&SeedSources>,
        infosphere: Infosphere,
    ) -> Result<String> {
        let state = self.run_state(query, seed, infosphere).await?;
        Ok(state.final_output().to_string())
    }

    /// Run every stage and return the final state.
    pub async fn run_state(
        &self,
        query: &str,
        seed: Option<&SeedSources>,
        infosphere: Infosphere,
    ) -> Result<PipelineState> {
        info!(
            query,
            infosphere = %infosphere,
            parallel = self.config.parallel_lenses,
            seeded = seed.is_some(),
            "Pipeline run started"
        );

        let run = RunContext {
            references: infosphere.references(),
            labels: SectionLabels::for_language(infosphere),
            seed,
        };
        let mut state = PipelineState::new(query, infosphere);
        let mut stage = Some(Stage::FIRST);

        if self.config.parallel_lenses {
            state = self.run_lenses_concurrently(state, &run).await?;
            stage = Some(Stage::Search(SearchScope::Fact));
        }

        while let Some(current) = stage {
            debug!(stage = %current, "Entering stage");
            state = self.step(current, state, &run).await?;
            stage = current.next();
        }

        info!(
            sources = SearchScope::ALL
                .iter()
                .map(|scope| state.sources(*scope).len())
                .sum::<usize>(),
            claims = state.all_claims().count(),
            fact_checks = state.fact_checks().len(),
            "Pipeline run finished"
        );
        Ok(state)
    }

    async fn step(
        &self,
        stage: Stage,
        state: PipelineState,
        run: &RunContext<'_>,
    ) -> Result<PipelineState> {
        let update = match stage {
            Stage::Search(scope) => {
                let sources = search(
                    self.searcher.as_deref(),
                    &state,
                    scope,
                    run.references.for_scope(scope),
                    run.seed,
                    &self.config,
                )
                .await?;
                StateUpdate::Sources(scope, sources)
            }
            Stage::Claims(lens) => {
                let claims = build_claims(
                    self.llm.as_ref(),
                    &state,
                    lens,
                    state.sources(lens.scope()),
                    run.references.for_scope(lens.scope()),
                    &self.config,
                )
                .await?;
                StateUpdate::Claims(lens, claims)
            }
            Stage::FactCheck => {
                let results = fact_check(
                    self.llm.as_ref(),
                    &state,
                    state.sources(SearchScope::Fact),
                    run.references.for_scope(SearchScope::Fact),
                    &self.config,
                )
                .await?;
                StateUpdate::FactChecks(results)
            }
            Stage::Synthesize => {
                StateUpdate::Synthesis(synthesize(self.llm.as_ref(), &state, &self.config).await?)
            }
            Stage::Render => {
                StateUpdate::FinalOutput(render_report(&state, &run.references, &run.labels))
            }
        };

        state.apply(update)
    }

    /// Search and claim building for all four lenses at once.
    ///
    /// Branches only read the initial snapshot. Their updates are applied in
    /// lens order afterwards, so the resulting state matches a sequential run.
    async fn run_lenses_concurrently(
        &self,
        state: PipelineState,
        run: &RunContext<'_>,
    ) -> Result<PipelineState> {
        let branches = Lens::ALL
            .into_iter()
            .map(|lens| self.lens_branch(&state, lens, run));
        let outcomes = try_join_all(branches).await?;

        let mut state = state;
        for (lens, sources, claims) in outcomes {
            state = state
                .apply(StateUpdate::Sources(lens.scope(), sources))?
                .apply(StateUpdate::Claims(lens, claims))?;
        }
        Ok(state)
    }

    async fn lens_branch(
        &self,
        state: &PipelineState,
        lens: Lens,
        run: &RunContext<'_>,
    ) -> Result<(Lens, Vec<Source>, Vec<Claim>)> {
        let references = run.references.for_scope(lens.scope());
        let sources = search(
            self.searcher.as_deref(),
            state,
            lens.scope(),
            references,
            run.seed,
            &self.config,
        )
        .await?;
        let claims = build_claims(
            self.llm.as_ref(),
            state,
            lens,
            &sources,
            references,
            &self.config,
        )
        .await?;
        Ok((lens, sources, claims))
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pipeline")
            .field("searcher", &self.searcher.is_some())
            .field("config", &self.config)
            .finish()
    }
}
