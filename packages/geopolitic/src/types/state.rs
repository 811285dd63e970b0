//! The aggregate threaded through every stage.
//!
//! `PipelineState` is append-only: each field starts unset and is filled by
//! exactly one stage. Stages never touch the state directly; they return a
//! [`StateUpdate`] and the orchestrator merges it with [`PipelineState::apply`],
//! which moves every other field through untouched.

use crate::error::{PipelineError, Result};
use crate::infosphere::Infosphere;

use super::{Claim, FactCheckResult, Lens, SearchScope, Source};

/// Snapshot of one pipeline run.
///
/// Fields are `None` until their owning stage has run, which is how a stage
/// that legitimately produced an empty list is told apart from one that has
/// not run yet. Accessors present unset fields as empty.
#[derive(Debug, Clone, PartialEq)]
pub struct PipelineState {
    query: String,
    language: Infosphere,
    left_claims: Option<Vec<Claim>>,
    centrist_claims: Option<Vec<Claim>>,
    right_claims: Option<Vec<Claim>>,
    people_claims: Option<Vec<Claim>>,
    left_sources: Option<Vec<Source>>,
    centrist_sources: Option<Vec<Source>>,
    right_sources: Option<Vec<Source>>,
    people_sources: Option<Vec<Source>>,
    fact_sources: Option<Vec<Source>>,
    fact_checks: Option<Vec<FactCheckResult>>,
    synthesis: Option<String>,
    final_output: Option<String>,
}

/// The output of one stage, naming the single field it fills.
#[derive(Debug, Clone, PartialEq)]
pub enum StateUpdate {
    Sources(SearchScope, Vec<Source>),
    Claims(Lens, Vec<Claim>),
    FactChecks(Vec<FactCheckResult>),
    Synthesis(String),
    FinalOutput(String),
}

impl StateUpdate {
    /// Name of the state field this update writes.
    pub fn field(&self) -> &'static str {
        match self {
            StateUpdate::Sources(scope, _) => match scope {
                SearchScope::Left => "left_sources",
                SearchScope::Centrist => "centrist_sources",
                SearchScope::Right => "right_sources",
                SearchScope::People => "people_sources",
                SearchScope::Fact => "fact_sources",
            },
            StateUpdate::Claims(lens, _) => match lens {
                Lens::Left => "left_claims",
                Lens::Centrist => "centrist_claims",
                Lens::Right => "right_claims",
                Lens::People => "people_claims",
            },
            StateUpdate::FactChecks(_) => "fact_checks",
            StateUpdate::Synthesis(_) => "synthesis",
            StateUpdate::FinalOutput(_) => "final_output",
        }
    }
}

impl PipelineState {
    /// Fresh state for a run: every list and string empty.
    pub fn new(query: impl Into<String>, language: Infosphere) -> Self {
        Self {
            query: query.into(),
            language,
            left_claims: None,
            centrist_claims: None,
            right_claims: None,
            people_claims: None,
            left_sources: None,
            centrist_sources: None,
            right_sources: None,
            people_sources: None,
            fact_sources: None,
            fact_checks: None,
            synthesis: None,
            final_output: None,
        }
    }

    /// Merge one stage's output, returning the next snapshot.
    ///
    /// Fails with [`PipelineError::StateConflict`] if the target field was
    /// already produced by an earlier stage.
    pub fn apply(self, update: StateUpdate) -> Result<Self> {
        if self.is_filled(&update) {
            return Err(PipelineError::StateConflict {
                field: update.field(),
            });
        }

        Ok(match update {
            StateUpdate::Sources(scope, sources) => match scope {
                SearchScope::Left => Self {
                    left_sources: Some(sources),
                    ..self
                },
                SearchScope::Centrist => Self {
                    centrist_sources: Some(sources),
                    ..self
                },
                SearchScope::Right => Self {
                    right_sources: Some(sources),
                    ..self
                },
                SearchScope::People => Self {
                    people_sources: Some(sources),
                    ..self
                },
                SearchScope::Fact => Self {
                    fact_sources: Some(sources),
                    ..self
                },
            },
            StateUpdate::Claims(lens, claims) => match lens {
                Lens::Left => Self {
                    left_claims: Some(claims),
                    ..self
                },
                Lens::Centrist => Self {
                    centrist_claims: Some(claims),
                    ..self
                },
                Lens::Right => Self {
                    right_claims: Some(claims),
                    ..self
                },
                Lens::People => Self {
                    people_claims: Some(claims),
                    ..self
                },
            },
            StateUpdate::FactChecks(results) => Self {
                fact_checks: Some(results),
                ..self
            },
            StateUpdate::Synthesis(text) => Self {
                synthesis: Some(text),
                ..self
            },
            StateUpdate::FinalOutput(text) => Self {
                final_output: Some(text),
                ..self
            },
        })
    }

    fn is_filled(&self, update: &StateUpdate) -> bool {
        match update {
            StateUpdate::Sources(scope, _) => self.sources_slot(*scope).is_some(),
            StateUpdate::Claims(lens, _) => self.claims_slot(*lens).is_some(),
            StateUpdate::FactChecks(_) => self.fact_checks.is_some(),
            StateUpdate::Synthesis(_) => self.synthesis.is_some(),
            StateUpdate::FinalOutput(_) => self.final_output.is_some(),
        }
    }

    fn sources_slot(&self, scope: SearchScope) -> Option<&Vec<Source>> {
        match scope {
            SearchScope::Left => self.left_sources.as_ref(),
            SearchScope::Centrist => self.centrist_sources.as_ref(),
            SearchScope::Right => self.right_sources.as_ref(),
            SearchScope::People => self.people_sources.as_ref(),
            SearchScope::Fact => self.fact_sources.as_ref(),
        }
    }

    fn claims_slot(&self, lens: Lens) -> Option<&Vec<Claim>> {
        match lens {
            Lens::Left => self.left_claims.as_ref(),
            Lens::Centrist => self.centrist_claims.as_ref(),
            Lens::Right => self.right_claims.as_ref(),
            Lens::People => self.people_claims.as_ref(),
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn language(&self) -> Infosphere {
        self.language
    }

    /// Sources gathered for `scope`; empty until its search stage has run.
    pub fn sources(&self, scope: SearchScope) -> &[Source] {
        self.sources_slot(scope).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Claims drafted for `lens`; empty until its claim stage has run.
    pub fn claims(&self, lens: Lens) -> &[Claim] {
        self.claims_slot(lens).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Claims of every lens in report order.
    pub fn all_claims(&self) -> impl Iterator<Item = &Claim> {
        Lens::ALL.into_iter().flat_map(move |lens| self.claims(lens))
    }

    pub fn fact_checks(&self) -> &[FactCheckResult] {
        self.fact_checks.as_deref().unwrap_or(&[])
    }

    pub fn synthesis(&self) -> &str {
        self.synthesis.as_deref().unwrap_or("")
    }

    pub fn final_output(&self) -> &str {
        self.final_output.as_deref().unwrap_or("")
    }

    /// Whether the render stage has run.
    pub fn is_complete(&self) -> bool {
        self.final_output.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn source(id: &str, url: &str) -> Source {
        Source::new(id, "Title", url, "notes")
    }

    #[test]
    fn test_new_state_is_empty() {
        let state = PipelineState::new("energy policy", Infosphere::English);

        assert_eq!(state.query(), "energy policy");
        assert_eq!(state.language(), Infosphere::English);
        for scope in SearchScope::ALL {
            assert!(state.sources(scope).is_empty());
        }
        assert_eq!(state.all_claims().count(), 0);
        assert!(state.fact_checks().is_empty());
        assert_eq!(state.synthesis(), "");
        assert_eq!(state.final_output(), "");
        assert!(!state.is_complete());
    }

    #[test]
    fn test_apply_replaces_only_owned_field() {
        let before = PipelineState::new("q", Infosphere::Polish)
            .apply(StateUpdate::Sources(
                SearchScope::Left,
                vec![source("S1", "https://l.test")],
            ))
            .unwrap();

        let after = before
            .clone()
            .apply(StateUpdate::Claims(
                Lens::Left,
                vec![Claim::new("claim", vec!["S1".into()])],
            ))
            .unwrap();

        assert_eq!(after.claims(Lens::Left).len(), 1);
        assert_eq!(after.sources(SearchScope::Left), before.sources(SearchScope::Left));
        assert_eq!(after.query(), before.query());
        assert_eq!(after.language(), before.language());
        assert_eq!(after.fact_checks(), before.fact_checks());
        assert_eq!(after.synthesis(), before.synthesis());
    }

    #[test]
    fn test_apply_rejects_second_write() {
        let state = PipelineState::new("q", Infosphere::English)
            .apply(StateUpdate::Synthesis("first".into()))
            .unwrap();

        let err = state
            .apply(StateUpdate::Synthesis("second".into()))
            .unwrap_err();
        assert!(matches!(
            err,
            PipelineError::StateConflict { field: "synthesis" }
        ));
    }

    #[test]
    fn test_empty_update_still_claims_field() {
        let state = PipelineState::new("q", Infosphere::English)
            .apply(StateUpdate::Sources(SearchScope::Fact, Vec::new()))
            .unwrap();

        assert!(state.sources(SearchScope::Fact).is_empty());
        assert!(state
            .apply(StateUpdate::Sources(SearchScope::Fact, Vec::new()))
            .is_err());
    }

    #[test]
    fn test_all_claims_follow_lens_order() {
        let mut state = PipelineState::new("q", Infosphere::English);
        for lens in [Lens::People, Lens::Right, Lens::Centrist, Lens::Left] {
            state = state
                .apply(StateUpdate::Claims(
                    lens,
                    vec![Claim::new(lens.key(), Vec::new())],
                ))
                .unwrap();
        }

        let texts: Vec<_> = state.all_claims().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, vec!["left", "centrist", "right", "people"]);
    }

    #[test]
    fn test_update_field_names() {
        assert_eq!(
            StateUpdate::Sources(SearchScope::People, Vec::new()).field(),
            "people_sources"
        );
        assert_eq!(StateUpdate::Claims(Lens::Right, Vec::new()).field(), "right_claims");
        assert_eq!(StateUpdate::FinalOutput(String::new()).field(), "final_output");
    }
}
