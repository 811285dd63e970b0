//! Locale bundles: reference outlets per scope and the report language.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PipelineError;
use crate::types::SearchScope;

/// Which set of reference outlets and which output language a run uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Infosphere {
    #[default]
    English,
    Polish,
}

impl Infosphere {
    pub fn as_str(self) -> &'static str {
        match self {
            Infosphere::English => "english",
            Infosphere::Polish => "polish",
        }
    }

    /// Language name as written into model prompts.
    pub fn response_language(self) -> &'static str {
        match self {
            Infosphere::English => "English",
            Infosphere::Polish => "Polish",
        }
    }

    /// Reference outlets for this infosphere.
    ///
    /// The Polish infosphere extends the English outlets with Polish ones,
    /// dropping repeated urls.
    pub fn references(self) -> ReferenceSet {
        match self {
            Infosphere::English => ReferenceSet::from_tables(&ENGLISH, &[]),
            Infosphere::Polish => ReferenceSet::from_tables(&ENGLISH, &POLISH),
        }
    }
}

impl fmt::Display for Infosphere {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Infosphere {
    type Err = PipelineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "english" => Ok(Infosphere::English),
            "polish" => Ok(Infosphere::Polish),
            _ => Err(PipelineError::Validation(format!(
                "Unsupported infosphere: {}",
                s
            ))),
        }
    }
}

/// A named outlet used to bias search and frame prompts. Never cited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    pub name: String,
    pub url: String,
}

impl Reference {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
        }
    }
}

/// Reference outlets for every search scope.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceSet {
    left: Vec<Reference>,
    centrist: Vec<Reference>,
    right: Vec<Reference>,
    people: Vec<Reference>,
    fact: Vec<Reference>,
}

impl ReferenceSet {
    pub fn for_scope(&self, scope: SearchScope) -> &[Reference] {
        match scope {
            SearchScope::Left => &self.left,
            SearchScope::Centrist => &self.centrist,
            SearchScope::Right => &self.right,
            SearchScope::People => &self.people,
            SearchScope::Fact => &self.fact,
        }
    }

    fn slot_mut(&mut self, scope: SearchScope) -> &mut Vec<Reference> {
        match scope {
            SearchScope::Left => &mut self.left,
            SearchScope::Centrist => &mut self.centrist,
            SearchScope::Right => &mut self.right,
            SearchScope::People => &mut self.people,
            SearchScope::Fact => &mut self.fact,
        }
    }

    fn from_tables(base: &OutletTable, extra: &OutletTable) -> Self {
        let mut set = Self::default();
        for scope in SearchScope::ALL {
            let mut seen = std::collections::HashSet::new();
            *set.slot_mut(scope) = outlets(base, scope)
                .iter()
                .chain(outlets(extra, scope))
                .filter(|(_, url)| seen.insert(*url))
                .map(|(name, url)| Reference::new(*name, *url))
                .collect();
        }
        set
    }
}

type OutletTable = [(SearchScope, &'static [(&'static str, &'static str)])];

fn outlets(table: &OutletTable, scope: SearchScope) -> &'static [(&'static str, &'static str)] {
    table
        .iter()
        .find(|(s, _)| *s == scope)
        .map(|(_, list)| *list)
        .unwrap_or(&[])
}

const SOCIAL: &[(&str, &str)] = &[
    ("Reddit", "https://www.reddit.com"),
    ("X (formerly Twitter)", "https://x.com"),
    ("Threads", "https://www.threads.net"),
];

const ENGLISH: [(SearchScope, &[(&str, &str)]); 5] = [
    (
        SearchScope::Left,
        &[
            ("Jacobin", "https://jacobin.com"),
            ("Economic Policy Institute", "https://www.epi.org"),
            ("Roosevelt Institute", "https://rooseveltinstitute.org"),
        ],
    ),
    (
        SearchScope::Centrist,
        &[
            ("Brookings Institution", "https://www.brookings.edu"),
            ("Council on Foreign Relations", "https://www.cfr.org"),
            ("The Economist", "https://www.economist.com"),
        ],
    ),
    (
        SearchScope::Right,
        &[
            ("American Enterprise Institute", "https://www.aei.org"),
            ("Heritage Foundation", "https://www.heritage.org"),
            ("Hoover Institution", "https://www.hoover.org"),
        ],
    ),
    (SearchScope::People, SOCIAL),
    (
        SearchScope::Fact,
        &[
            ("Reuters Fact Check", "https://www.reuters.com/fact-check"),
            ("AP Fact Check", "https://apnews.com/hub/ap-fact-check"),
            ("FactCheck.org", "https://www.factcheck.org"),
        ],
    ),
];

const POLISH: [(SearchScope, &[(&str, &str)]); 5] = [
    (
        SearchScope::Left,
        &[
            ("Krytyka Polityczna", "https://krytykapolityczna.pl"),
            ("OKO.press", "https://oko.press"),
            ("Krytyka", "https://krytyka.info"),
        ],
    ),
    (
        SearchScope::Centrist,
        &[
            ("Polityka", "https://www.polityka.pl"),
            ("Rzeczpospolita", "https://www.rp.pl"),
            ("TVN24", "https://tvn24.pl"),
        ],
    ),
    (
        SearchScope::Right,
        &[
            ("Do Rzeczy", "https://dorzeczy.pl"),
            ("wPolityce", "https://wpolityce.pl"),
            ("Gazeta Polska", "https://www.gazetapolska.pl"),
        ],
    ),
    (SearchScope::People, SOCIAL),
    (
        SearchScope::Fact,
        &[
            ("Demagog", "https://demagog.org.pl"),
            ("OKO.press Fakt-checking", "https://oko.press/temat/fake-news"),
            ("AFP Sprawdzamy", "https://sprawdzam.afp.com"),
        ],
    ),
];
