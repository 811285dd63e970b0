//! Sources, claims and fact-check verdicts.

use serde::{Deserialize, Serialize};

/// A search result retained as evidence for one lens.
///
/// `id` is only unique within the lens that produced it ("S1", "S2", ...).
/// `url` is the identity used when sources from different lenses are merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Source {
    pub id: String,
    pub title: String,
    pub url: String,
    /// Whitespace-collapsed summary, at most 240 characters.
    pub notes: String,
}

impl Source {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        url: impl Into<String>,
        notes: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            url: url.into(),
            notes: notes.into(),
        }
    }
}

/// A model-drafted statement citing source ids of its own lens.
///
/// Cited ids are not checked against the lens's sources.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub text: String,
    pub source_ids: Vec<String>,
}

impl Claim {
    pub fn new(text: impl Into<String>, source_ids: Vec<String>) -> Self {
        Self {
            text: text.into(),
            source_ids,
        }
    }
}

/// A verdict on a claim as restated by the fact checker.
///
/// `claim` is rebuilt from the checker's output rather than pointing at the
/// original claim, so results may merge, split or omit input claims.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactCheckResult {
    pub claim: Claim,
    /// Free text; see [`verdicts`] for the values the prompt asks for.
    pub verdict: String,
    pub rationale: String,
}

/// Verdict labels requested from the fact checker. Not enforced on output.
pub mod verdicts {
    pub const TRUE: &str = "TRUE";
    pub const PARTIALLY_TRUE: &str = "PARTIALLY TRUE";
    pub const MISLEADING: &str = "MISLEADING";
    pub const FALSE: &str = "FALSE";

    pub const ALL: [&str; 4] = [TRUE, PARTIALLY_TRUE, MISLEADING, FALSE];
}
