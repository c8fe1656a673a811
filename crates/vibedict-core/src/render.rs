use serde::Serialize;
use vibedict_types::{AnnotatedTerm, CorpusItem, Sentence};

use crate::annotation::TextAnnotationIndex;
use crate::highlight::HighlightMatcher;
use crate::ruby::{self, RubyToken};

/// A span ready for presentation. Only spans with a `term` are click targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedSpan<'a> {
    pub text: &'a str,
    pub ruby: Vec<RubyToken<'a>>,
    pub term: Option<&'a AnnotatedTerm>,
}

impl RenderedSpan<'_> {
    pub fn is_clickable(&self) -> bool {
        self.term.is_some()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RenderedSentence<'a> {
    pub spans: Vec<RenderedSpan<'a>>,
    pub translated: &'a str,
}

/// Match first, then segment ruby inside every span.
///
/// Running the segmenter after matching keeps bracket markup from shifting
/// match boundaries.
pub fn render_sentence<'a>(matcher: &'a HighlightMatcher, source: &'a str) -> Vec<RenderedSpan<'a>> {
    matcher
        .match_spans(source)
        .into_iter()
        .map(|span| RenderedSpan {
            text: span.text(),
            ruby: ruby::segment(span.text()),
            term: span.term(),
        })
        .collect()
}

/// Render-ready view of one corpus item.
///
/// The annotation index and its pattern are built once; sentences are
/// rendered on demand.
pub struct CorpusView {
    item: CorpusItem,
    matcher: HighlightMatcher,
}

impl CorpusView {
    pub fn new(item: CorpusItem) -> Self {
        let index = TextAnnotationIndex::from_analysis(&item.analysis);
        tracing::debug!(
            "Built annotation index for '{}': {} terms",
            item.title,
            index.len()
        );

        Self {
            item,
            matcher: HighlightMatcher::new(index),
        }
    }

    pub fn item(&self) -> &CorpusItem {
        &self.item
    }

    pub fn index(&self) -> &TextAnnotationIndex {
        self.matcher.index()
    }

    pub fn render_sentence<'a>(&'a self, sentence: &'a Sentence) -> RenderedSentence<'a> {
        RenderedSentence {
            spans: render_sentence(&self.matcher, &sentence.original),
            translated: &sentence.translated,
        }
    }

    pub fn render(&self) -> Vec<RenderedSentence<'_>> {
        self.item
            .analysis
            .sentences
            .iter()
            .map(|s| self.render_sentence(s))
            .collect()
    }

    /// Every click target across all sentences, in reading order
    pub fn click_targets(&self) -> Vec<&AnnotatedTerm> {
        self.item
            .analysis
            .sentences
            .iter()
            .flat_map(|s| self.matcher.match_spans(&s.original))
            .filter_map(|span| span.term())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use vibedict_types::{CorpusAnalysis, GrammarPoint, TermKind, VocabularyEntry};

    use super::*;

    fn item() -> CorpusItem {
        CorpusItem {
            id: "c1".into(),
            title: "漢字".into(),
            content: "漢字が好き。東京都に住む。".into(),
            analysis: CorpusAnalysis {
                detected_lang: "Japanese".into(),
                summary: "likes".into(),
                sentences: vec![
                    Sentence {
                        original: "漢字[かんじ]が好[す]き。".into(),
                        translated: "I like kanji.".into(),
                    },
                    Sentence {
                        original: "東京都[とうきょうと]に住む。".into(),
                        translated: "I live in Tokyo.".into(),
                    },
                ],
                vocabulary: vec![
                    VocabularyEntry {
                        term: "漢字[かんじ]".into(),
                        pronunciation: Some("kanji".into()),
                        explanation: "Chinese characters".into(),
                        examples: vec![],
                    },
                    VocabularyEntry {
                        term: "東京".into(),
                        pronunciation: None,
                        explanation: "Tokyo".into(),
                        examples: vec![],
                    },
                ],
                grammar: vec![GrammarPoint {
                    point: "に".into(),
                    explanation: "location of existence".into(),
                    examples: vec![],
                }],
            },
            added_at: 0,
        }
    }

    #[test]
    fn ruby_inside_highlight_is_segmented_after_matching() {
        let view = CorpusView::new(item());
        let rendered = view.render();

        let first = &rendered[0].spans[0];
        assert_eq!(first.text, "漢字[かんじ]");
        assert_eq!(first.term.map(|t| t.kind), Some(TermKind::Vocabulary));
        assert_eq!(
            first.ruby,
            vec![RubyToken::Annotated {
                base: "漢字",
                reading: "かんじ"
            }]
        );

        let rest = &rendered[0].spans[1];
        assert!(!rest.is_clickable());
        assert_eq!(
            rest.ruby,
            vec![
                RubyToken::Annotated {
                    base: "が好",
                    reading: "す"
                },
                RubyToken::Bare { text: "き。" },
            ]
        );
    }

    #[test]
    fn match_can_split_annotated_run() {
        // the base 東京都 is cut by the 東京 match; both halves stay lossless
        let view = CorpusView::new(item());
        let sentence = &view.render()[1];

        let texts: Vec<&str> = sentence.spans.iter().map(|s| s.text).collect();
        assert_eq!(texts, vec!["東京", "都[とうきょうと]", "に", "住む。"]);
        assert_eq!(sentence.translated, "I live in Tokyo.");

        let tail = &sentence.spans[1];
        assert_eq!(
            tail.ruby,
            vec![RubyToken::Annotated {
                base: "都",
                reading: "とうきょうと"
            }]
        );
    }

    #[test]
    fn click_targets_follow_reading_order() {
        let view = CorpusView::new(item());
        let targets: Vec<&str> = view
            .click_targets()
            .iter()
            .map(|t| t.term.as_str())
            .collect();
        assert_eq!(targets, vec!["漢字[かんじ]", "東京", "に"]);
    }

    #[test]
    fn rendering_twice_is_identical() {
        let view = CorpusView::new(item());
        assert_eq!(view.render()[0].spans, view.render()[0].spans);
    }
}
