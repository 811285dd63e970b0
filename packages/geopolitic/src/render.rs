//! Report rendering.
//!
//! Pure formatting over a finished [`PipelineState`]. Nothing here calls a
//! collaborator, so the same state always renders to the same text.

use indexmap::IndexMap;

use crate::infosphere::{Infosphere, Reference, ReferenceSet};
use crate::types::{Claim, FactCheckResult, Lens, PipelineState, SearchScope, Source};

/// Section headers and captions for one report language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SectionLabels {
    pub background: &'static str,
    pub left: &'static str,
    pub centrist: &'static str,
    pub right: &'static str,
    pub people: &'static str,
    pub fact_checks: &'static str,
    pub synthesis: &'static str,
    pub references_caption: &'static str,
}

impl SectionLabels {
    pub const ENGLISH: SectionLabels = SectionLabels {
        background: "1. 🔎 Factual Background (from Web Searcher)",
        left: "2. 🔴 Left Perspective",
        centrist: "3. 🟡 Centrist Perspective",
        right: "4. 🔵 Right Perspective",
        people: "5. 🟣 People's Perspective",
        fact_checks: "6. ✅ Fact Check Results",
        synthesis: "7. ⚖️ Synthesis & Best-Supported Conclusion",
        references_caption: "Preferred references:",
    };

    pub const POLISH: SectionLabels = SectionLabels {
        background: "1. 🔎 Tło faktograficzne (z wyszukiwarki)",
        left: "2. 🔴 Perspektywa lewicowa",
        centrist: "3. 🟡 Perspektywa centrowa",
        right: "4. 🔵 Perspektywa prawicowa",
        people: "5. 🟣 Perspektywa społeczna",
        fact_checks: "6. ✅ Wyniki weryfikacji faktów",
        synthesis: "7. ⚖️ Synteza i najlepiej uzasadniony wniosek",
        references_caption: "Preferowane źródła:",
    };

    pub fn for_language(language: Infosphere) -> Self {
        match language {
            Infosphere::English => Self::ENGLISH,
            Infosphere::Polish => Self::POLISH,
        }
    }

    /// The seven section headers in report order.
    pub fn headers(&self) -> [&'static str; 7] {
        [
            self.background,
            self.left,
            self.centrist,
            self.right,
            self.people,
            self.fact_checks,
            self.synthesis,
        ]
    }

    fn lens(&self, lens: Lens) -> &'static str {
        match lens {
            Lens::Left => self.left,
            Lens::Centrist => self.centrist,
            Lens::Right => self.right,
            Lens::People => self.people,
        }
    }
}

/// All sources of the run, deduplicated by url.
///
/// Scopes are visited left, centrist, right, people, fact; the first source
/// seen for a url wins.
pub fn merge_sources(state: &PipelineState) -> Vec<Source> {
    let mut merged: IndexMap<&str, &Source> = IndexMap::new();
    for scope in SearchScope::ALL {
        for source in state.sources(scope) {
            merged.entry(source.url.as_str()).or_insert(source);
        }
    }
    merged.into_values().cloned().collect()
}

pub fn render_sources(sources: &[Source]) -> String {
    sources
        .iter()
        .map(|s| format!("- [{}] {} ({}) — {}", s.id, s.title, s.url, s.notes))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_claims(claims: &[Claim]) -> String {
    claims
        .iter()
        .map(|c| {
            let cite = if c.source_ids.is_empty() {
                "no sources".to_string()
            } else {
                c.source_ids.join(", ")
            };
            format!("- {} (Sources: {})", c.text, cite)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_reference_list(references: &[Reference]) -> String {
    references
        .iter()
        .map(|r| format!("- {} ({})", r.name, r.url))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn render_fact_checks(results: &[FactCheckResult]) -> String {
    results
        .iter()
        .map(|r| format!("- {}: {} — {}", r.verdict, r.claim.text, r.rationale))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The full report.
///
/// Every section header is written even when its body is empty. Lens and
/// fact-check sections list the preferred reference outlets before the body.
pub fn render_report(
    state: &PipelineState,
    references: &ReferenceSet,
    labels: &SectionLabels,
) -> String {
    let mut lines: Vec<String> = Vec::new();

    lines.push(labels.background.to_string());
    lines.push(render_sources(&merge_sources(state)));
    lines.push(String::new());

    for lens in Lens::ALL {
        lines.push(labels.lens(lens).to_string());
        lines.push(labels.references_caption.to_string());
        lines.push(render_reference_list(references.for_scope(lens.scope())));
        lines.push(render_claims(state.claims(lens)));
        lines.push(String::new());
    }

    lines.push(labels.fact_checks.to_string());
    lines.push(labels.references_caption.to_string());
    lines.push(render_reference_list(references.for_scope(SearchScope::Fact)));
    lines.push(render_fact_checks(state.fact_checks()));
    lines.push(String::new());

    lines.push(labels.synthesis.to_string());
    lines.push(state.synthesis().to_string());

    lines.join("\n")
}

/// Decode collaborator or report bytes, replacing invalid UTF-8 with U+FFFD.
pub fn sanitize_output(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::StateUpdate;

    fn source(id: &str, url: &str) -> Source {
        Source::new(id, format!("Title {}", id), url, "notes")
    }

    fn state_with_sources() -> PipelineState {
        PipelineState::new("q", Infosphere::English)
            .apply(StateUpdate::Sources(
                SearchScope::Left,
                vec![source("S1", "https://shared.test"), source("S2", "https://left.test")],
            ))
            .unwrap()
            .apply(StateUpdate::Sources(
                SearchScope::Right,
                vec![source("S1", "https://right.test"), source("S2", "https://shared.test")],
            ))
            .unwrap()
            .apply(StateUpdate::Sources(
                SearchScope::Fact,
                vec![source("S1", "https://left.test")],
            ))
            .unwrap()
    }

    #[test]
    fn test_merge_keeps_first_occurrence_in_lens_order() {
        let merged = merge_sources(&state_with_sources());
        let urls: Vec<_> = merged.iter().map(|s| s.url.as_str()).collect();

        assert_eq!(
            urls,
            vec!["https://shared.test", "https://left.test", "https://right.test"]
        );
        // The left copy of the shared url wins over the right one.
        assert_eq!(merged[0].id, "S1");
    }

    #[test]
    fn test_renderers_are_empty_on_empty_input() {
        assert_eq!(render_sources(&[]), "");
        assert_eq!(render_claims(&[]), "");
        assert_eq!(render_reference_list(&[]), "");
        assert_eq!(render_fact_checks(&[]), "");
    }

    #[test]
    fn test_line_formats() {
        assert_eq!(
            render_sources(&[Source::new("S1", "Report", "https://r.test", "Summary.")]),
            "- [S1] Report (https://r.test) — Summary."
        );
        assert_eq!(
            render_claims(&[
                Claim::new("Cited", vec!["S1".into(), "S2".into()]),
                Claim::new("Uncited", Vec::new()),
            ]),
            "- Cited (Sources: S1, S2)\n- Uncited (Sources: no sources)"
        );
        assert_eq!(
            render_fact_checks(&[FactCheckResult {
                claim: Claim::new("Wind is cheap", Vec::new()),
                verdict: "TRUE".into(),
                rationale: "Auction data.".into(),
            }]),
            "- TRUE: Wind is cheap — Auction data."
        );
    }

    #[test]
    fn test_empty_report_has_every_section_in_order() {
        let state = PipelineState::new("q", Infosphere::English);
        let report = render_report(&state, &ReferenceSet::default(), &SectionLabels::ENGLISH);

        let mut last = 0;
        for header in SectionLabels::ENGLISH.headers() {
            let at = report.find(header).unwrap();
            assert!(at >= last, "{} out of order", header);
            last = at;
        }
        assert_eq!(report.matches("Preferred references:").count(), 5);
    }

    #[test]
    fn test_references_precede_claims() {
        let state = PipelineState::new("q", Infosphere::English)
            .apply(StateUpdate::Claims(Lens::Left, vec![Claim::new("A claim", Vec::new())]))
            .unwrap();
        let references = Infosphere::English.references();

        let report = render_report(&state, &references, &SectionLabels::ENGLISH);

        let section = report
            .split("2. 🔴 Left Perspective\n")
            .nth(1)
            .unwrap();
        assert!(section.starts_with(
            "Preferred references:\n- Jacobin (https://jacobin.com)\n"
        ));
        assert!(section.contains("https://rooseveltinstitute.org)\n- A claim (Sources: no sources)\n"));
    }

    #[test]
    fn test_polish_labels() {
        let labels = SectionLabels::for_language(Infosphere::Polish);
        assert_eq!(labels, SectionLabels::POLISH);
        for (pl, en) in labels.headers().iter().zip(SectionLabels::ENGLISH.headers()) {
            assert_ne!(*pl, en);
        }
    }

    #[test]
    fn test_sanitize_output_replaces_invalid_bytes() {
        assert_eq!(sanitize_output(b"ok \xff end"), "ok \u{FFFD} end");
        assert_eq!(sanitize_output("zażółć".as_bytes()), "zażółć");
    }
}
