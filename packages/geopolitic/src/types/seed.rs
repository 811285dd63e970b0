//! Caller-supplied sources that bypass live search.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::{SearchScope, Source};

/// Pre-fetched sources, either one list for every scope or one list per scope.
///
/// In JSON the shared form is a plain array and the per-scope form an object
/// keyed by `left`, `centrist`, `right`, `people` or `fact`. Other keys and
/// `null` lists are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged, from = "SeedInput")]
pub enum SeedSources {
    Shared(Vec<Source>),
    PerScope(HashMap<SearchScope, Vec<Source>>),
}

/// Wire form of [`SeedSources`] before scope keys are resolved.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeedInput {
    Shared(Vec<Source>),
    PerScope(HashMap<String, Option<Vec<Source>>>),
}

impl From<SeedInput> for SeedSources {
    fn from(input: SeedInput) -> Self {
        match input {
            SeedInput::Shared(sources) => Self::Shared(sources),
            SeedInput::PerScope(map) => Self::PerScope(
                map.into_iter()
                    .filter_map(|(key, sources)| Some((SearchScope::from_key(&key)?, sources?)))
                    .collect(),
            ),
        }
    }
}

impl SeedSources {
    /// Start an empty per-scope seed.
    pub fn per_scope() -> Self {
        Self::PerScope(HashMap::new())
    }

    /// Set the seed for one scope. A shared seed is first expanded to every scope.
    pub fn with_scope(self, scope: SearchScope, sources: Vec<Source>) -> Self {
        let mut map = match self {
            Self::PerScope(map) => map,
            Self::Shared(shared) => SearchScope::ALL
                .into_iter()
                .map(|s| (s, shared.clone()))
                .collect(),
        };
        map.insert(scope, sources);
        Self::PerScope(map)
    }

    /// Seed for `scope`, if one was given. Empty lists count as absent.
    pub fn for_scope(&self, scope: SearchScope) -> Option<&[Source]> {
        let sources = match self {
            Self::Shared(sources) => sources.as_slice(),
            Self::PerScope(map) => map.get(&scope)?.as_slice(),
        };
        (!sources.is_empty()).then_some(sources)
    }
}
