//! Political lenses and the search scopes that feed them.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A perspective for which sources and claims are gathered independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lens {
    Left,
    Centrist,
    Right,
    People,
}

impl Lens {
    /// Report and merge order.
    pub const ALL: [Lens; 4] = [Lens::Left, Lens::Centrist, Lens::Right, Lens::People];

    pub fn key(self) -> &'static str {
        self.scope().key()
    }

    /// The search scope holding this lens's sources.
    pub fn scope(self) -> SearchScope {
        match self {
            Lens::Left => SearchScope::Left,
            Lens::Centrist => SearchScope::Centrist,
            Lens::Right => SearchScope::Right,
            Lens::People => SearchScope::People,
        }
    }

    /// How the claim prompt names the perspective.
    pub fn perspective(self) -> &'static str {
        match self {
            Lens::Left => "leftist",
            Lens::Centrist => "centrist",
            Lens::Right => "right-wing",
            Lens::People => "people (public discourse on social platforms)",
        }
    }
}

impl fmt::Display for Lens {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Every source list the pipeline fills: one per lens plus the fact-check pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchScope {
    Left,
    Centrist,
    Right,
    People,
    Fact,
}

impl SearchScope {
    /// Order used when merging sources across scopes.
    pub const ALL: [SearchScope; 5] = [
        SearchScope::Left,
        SearchScope::Centrist,
        SearchScope::Right,
        SearchScope::People,
        SearchScope::Fact,
    ];

    /// Identifier used in seed maps and logs.
    pub fn key(self) -> &'static str {
        match self {
            SearchScope::Left => "left",
            SearchScope::Centrist => "centrist",
            SearchScope::Right => "right",
            SearchScope::People => "people",
            SearchScope::Fact => "fact",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.key() == key)
    }
}

impl fmt::Display for SearchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
