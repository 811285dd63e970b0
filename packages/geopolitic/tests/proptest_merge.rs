//! Property-based tests for source merging and state updates using proptest.

use std::collections::HashSet;

use proptest::prelude::*;

use geopolitic::pipeline::search::summarize_notes;
use geopolitic::{merge_sources, Infosphere, PipelineState, SearchScope, Source, StateUpdate};

fn source_strategy() -> impl Strategy<Value = Source> {
    // A small url space so duplicates across scopes are common.
    (1u8..8, 0u8..6).prop_map(|(id, host)| {
        Source::new(
            format!("S{}", id),
            format!("Title {}", id),
            format!("https://host{}.test", host),
            "notes",
        )
    })
}

fn scoped_sources() -> impl Strategy<Value = Vec<Vec<Source>>> {
    prop::collection::vec(prop::collection::vec(source_strategy(), 0..6), 5)
}

fn state_from(lists: &[Vec<Source>]) -> PipelineState {
    SearchScope::ALL
        .into_iter()
        .zip(lists.iter().cloned())
        .fold(PipelineState::new("q", Infosphere::English), |state, (scope, sources)| {
            state.apply(StateUpdate::Sources(scope, sources)).unwrap()
        })
}

// --- Merge dedup properties ---

proptest! {
    #[test]
    fn merged_urls_are_unique(lists in scoped_sources()) {
        let merged = merge_sources(&state_from(&lists));
        let urls: HashSet<_> = merged.iter().map(|s| s.url.clone()).collect();
        prop_assert_eq!(urls.len(), merged.len());
    }

    #[test]
    fn merge_keeps_first_occurrence_in_scope_order(lists in scoped_sources()) {
        let merged = merge_sources(&state_from(&lists));

        let mut expected: Vec<Source> = Vec::new();
        for source in lists.iter().flatten() {
            if !expected.iter().any(|s| s.url == source.url) {
                expected.push(source.clone());
            }
        }
        prop_assert_eq!(merged, expected);
    }

    #[test]
    fn every_input_url_survives_merge(lists in scoped_sources()) {
        let merged = merge_sources(&state_from(&lists));
        for source in lists.iter().flatten() {
            prop_assert!(merged.iter().any(|s| s.url == source.url));
        }
    }
}

// --- Notes properties ---

proptest! {
    #[test]
    fn notes_never_exceed_limit(content in "\\PC{0,600}", limit in 1usize..300) {
        let notes = summarize_notes(&content, limit);
        prop_assert!(notes.chars().count() <= limit.max("No summary provided.".len()));
    }

    #[test]
    fn notes_have_no_line_breaks(content in "[a-z \\n\\t]{0,300}") {
        let notes = summarize_notes(&content, 240);
        prop_assert!(!notes.contains('\n'));
        prop_assert!(!notes.contains('\t'));
        prop_assert!(!notes.contains("  "));
    }
}
