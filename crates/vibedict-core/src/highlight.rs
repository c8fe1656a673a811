use regex::{Regex, RegexBuilder};
use serde::Serialize;
use vibedict_types::AnnotatedTerm;

use crate::annotation::TextAnnotationIndex;

/// Upper bound for the compiled alternation
const PATTERN_SIZE_LIMIT: usize = 32 * (1 << 20);

/// A run of source text, either untouched or attached to a known term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Span<'a> {
    Plain { text: &'a str },
    Highlighted { text: &'a str, term: &'a AnnotatedTerm },
}

impl<'a> Span<'a> {
    pub fn text(&self) -> &'a str {
        match self {
            Span::Plain { text } | Span::Highlighted { text, .. } => text,
        }
    }

    pub fn term(&self) -> Option<&'a AnnotatedTerm> {
        match self {
            Span::Plain { .. } => None,
            Span::Highlighted { term, .. } => Some(term),
        }
    }
}

/// Splits sentences into plain and highlighted spans.
///
/// All index literals are escaped and joined into one alternation in index
/// order. Matching is leftmost-first: the earliest start wins and at a shared
/// start the first alternative (the longest term) wins. A consumed character
/// is never reconsidered for another term.
#[derive(Debug, Clone)]
pub struct HighlightMatcher {
    index: TextAnnotationIndex,
    pattern: Option<Regex>,
}

impl HighlightMatcher {
    pub fn new(index: TextAnnotationIndex) -> Self {
        Self::with_size_limit(index, PATTERN_SIZE_LIMIT)
    }

    /// Like [`HighlightMatcher::new`] with a custom bound on the compiled
    /// pattern; an index that does not fit renders as plain text
    pub fn with_size_limit(index: TextAnnotationIndex, size_limit: usize) -> Self {
        let pattern = compile(&index, size_limit);
        Self { index, pattern }
    }

    pub fn index(&self) -> &TextAnnotationIndex {
        &self.index
    }

    /// Lossless partition of `source` into spans; no two Plain spans are adjacent
    pub fn match_spans<'a>(&'a self, source: &'a str) -> Vec<Span<'a>> {
        split(self.pattern.as_ref(), &self.index, source)
    }
}

/// One-shot match without keeping the compiled pattern around
pub fn match_spans<'a>(source: &'a str, index: &'a TextAnnotationIndex) -> Vec<Span<'a>> {
    split(compile(index, PATTERN_SIZE_LIMIT).as_ref(), index, source)
}

fn compile(index: &TextAnnotationIndex, size_limit: usize) -> Option<Regex> {
    let alternation = index
        .literals()
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join("|");

    if alternation.is_empty() {
        return None;
    }

    match RegexBuilder::new(&alternation)
        .size_limit(size_limit)
        .build()
    {
        Ok(re) => Some(re),
        Err(e) => {
            tracing::warn!(
                "Highlight pattern over {} terms failed to compile, rendering plain: {}",
                index.len(),
                e
            );
            None
        }
    }
}

fn split<'a>(
    pattern: Option<&Regex>,
    index: &'a TextAnnotationIndex,
    source: &'a str,
) -> Vec<Span<'a>> {
    let Some(pattern) = pattern else {
        return plain_only(source);
    };

    let mut spans = Vec::new();
    let mut cursor = 0;

    // Plain runs only ever sit between highlights, so they never touch.
    // An unattached match leaves the cursor behind and joins the next run.
    for m in pattern.find_iter(source) {
        let Some(term) = index.find(m.as_str()) else {
            continue;
        };

        push_plain(&mut spans, &source[cursor..m.start()]);
        spans.push(Span::Highlighted {
            text: m.as_str(),
            term,
        });
        cursor = m.end();
    }

    push_plain(&mut spans, &source[cursor..]);
    spans
}

fn plain_only(source: &str) -> Vec<Span<'_>> {
    if source.is_empty() {
        Vec::new()
    } else {
        vec![Span::Plain { text: source }]
    }
}

fn push_plain<'s>(spans: &mut Vec<Span<'s>>, text: &'s str) {
    if !text.is_empty() {
        spans.push(Span::Plain { text });
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use vibedict_types::TermKind;

    use super::*;

    fn term(text: &str, kind: TermKind) -> AnnotatedTerm {
        AnnotatedTerm {
            term: text.to_string(),
            kind,
            pronunciation: None,
            explanation: String::new(),
            examples: vec![],
        }
    }

    fn vocab(texts: &[&str]) -> TextAnnotationIndex {
        TextAnnotationIndex::build(texts.iter().map(|t| term(t, TermKind::Vocabulary)))
    }

    fn shape<'a>(spans: &[Span<'a>]) -> Vec<(bool, &'a str)> {
        spans
            .iter()
            .map(|s| (s.term().is_some(), s.text()))
            .collect()
    }

    #[test]
    fn empty_index_yields_single_plain() {
        let index = TextAnnotationIndex::default();
        let spans = match_spans("hello world", &index);
        assert_eq!(spans, vec![Span::Plain { text: "hello world" }]);
    }

    #[test]
    fn oversized_pattern_falls_back_to_plain() {
        let terms: Vec<String> = (0..200).map(|i| format!("漢字{i:04}")).collect();
        let index = TextAnnotationIndex::build(terms.iter().map(|t| term(t, TermKind::Vocabulary)));
        let source = "0漢字0001 text";

        let matcher = HighlightMatcher::with_size_limit(index.clone(), 64);
        assert_eq!(matcher.match_spans(source), vec![Span::Plain { text: source }]);
        assert!(matcher.match_spans("").is_empty());

        // same index within the default bound still highlights
        let matcher = HighlightMatcher::new(index);
        assert_eq!(
            shape(&matcher.match_spans(source)),
            vec![(false, "0"), (true, "漢字0001"), (false, " text")]
        );
    }

    #[test]
    fn longest_match_wins_at_same_start() {
        let index = vocab(&["a", "ab"]);
        let spans = match_spans("xaby", &index);
        assert_eq!(shape(&spans), vec![(false, "x"), (true, "ab"), (false, "y")]);
    }

    #[test]
    fn no_backtracking_over_consumed_text() {
        let index = vocab(&["東京", "京都"]);
        let spans = match_spans("東京都", &index);
        assert_eq!(shape(&spans), vec![(true, "東京"), (false, "都")]);
    }

    #[test]
    fn each_occurrence_is_its_own_span() {
        let index = vocab(&["猫"]);
        let spans = match_spans("猫と猫猫", &index);
        assert_eq!(
            shape(&spans),
            vec![(true, "猫"), (false, "と"), (true, "猫"), (true, "猫")]
        );
    }

    #[test]
    fn metacharacters_are_literal() {
        let index = vocab(&["a.c", "(x|y)", "[かんじ]"]);
        let spans = match_spans("abc a.c (x|y) x 字[かんじ]", &index);
        assert_eq!(
            shape(&spans),
            vec![
                (false, "abc "),
                (true, "a.c"),
                (false, " "),
                (true, "(x|y)"),
                (false, " x 字"),
                (true, "[かんじ]"),
            ]
        );
    }

    #[test]
    fn identical_literal_attaches_first_term() {
        let index = TextAnnotationIndex::build(vec![
            term("は", TermKind::Vocabulary),
            term("は", TermKind::Grammar),
        ]);
        let spans = match_spans("私は", &index);
        assert_eq!(spans[1].term().map(|t| t.kind), Some(TermKind::Vocabulary));
    }

    #[test]
    fn ruby_markup_outside_match_is_left_for_segmenter() {
        let index = vocab(&["漢字"]);
        let spans = match_spans("漢字[かんじ]が好き", &index);
        assert_eq!(shape(&spans), vec![(true, "漢字"), (false, "[かんじ]が好き")]);
    }

    #[test]
    fn astral_plane_text_survives() {
        let index = vocab(&["𠮷野"]);
        let spans = match_spans("😀𠮷野家😀", &index);
        assert_eq!(
            shape(&spans),
            vec![(false, "😀"), (true, "𠮷野"), (false, "家😀")]
        );
    }

    #[test]
    fn rerendering_is_idempotent() {
        let terms = vec![
            term("食べる", TermKind::Vocabulary),
            term("べる", TermKind::Grammar),
        ];
        let text = "ご飯を食べる。パンを食べる。";

        let first_index = TextAnnotationIndex::build(terms.clone());
        let second_index = TextAnnotationIndex::build(terms);

        assert_eq!(
            match_spans(text, &first_index),
            match_spans(text, &second_index)
        );
    }

    #[test]
    fn empty_source_yields_no_spans() {
        let index = vocab(&["a"]);
        assert!(match_spans("", &index).is_empty());
    }

    proptest! {
        #[test]
        fn partition_is_lossless(
            text in "[abc東京都 .]{0,40}",
            terms in proptest::collection::vec("[abc東京都.]{1,4}", 0..6),
        ) {
            let index = vocab(&terms.iter().map(String::as_str).collect::<Vec<_>>());
            let spans = match_spans(&text, &index);

            let rebuilt: String = spans.iter().map(|s| s.text()).collect();
            prop_assert_eq!(rebuilt.as_str(), text.as_str());

            for pair in spans.windows(2) {
                let both_plain = pair[0].term().is_none() && pair[1].term().is_none();
                prop_assert!(!both_plain);
            }
        }
    }
}
