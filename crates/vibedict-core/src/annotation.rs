use std::cmp::Reverse;
use std::collections::HashMap;

use unicode_segmentation::UnicodeSegmentation;
use vibedict_types::{AnnotatedTerm, CorpusAnalysis};

/// Highlight terms in match priority order.
///
/// Terms are ordered by descending length in grapheme clusters so a longer
/// phrase is always tried before any shorter term it contains. The sort is
/// stable: equal-length terms keep their input order, which for a corpus
/// analysis means vocabulary before grammar.
#[derive(Debug, Clone, Default)]
pub struct TextAnnotationIndex {
    terms: Vec<AnnotatedTerm>,
    /// Literal -> position of the first term carrying it
    first_by_literal: HashMap<String, usize>,
}

impl TextAnnotationIndex {
    pub fn build(terms: impl IntoIterator<Item = AnnotatedTerm>) -> Self {
        let mut ranked: Vec<(usize, AnnotatedTerm)> = terms
            .into_iter()
            .filter(|t| {
                let keep = !t.term.trim().is_empty();
                if !keep {
                    tracing::debug!("Dropping {:?} term with blank literal", t.kind);
                }
                keep
            })
            .map(|t| (grapheme_len(&t.term), t))
            .collect();

        ranked.sort_by_key(|(len, _)| Reverse(*len));

        let terms: Vec<AnnotatedTerm> = ranked.into_iter().map(|(_, t)| t).collect();

        let mut first_by_literal = HashMap::with_capacity(terms.len());
        for (idx, term) in terms.iter().enumerate() {
            if first_by_literal.contains_key(&term.term) {
                tracing::debug!("Duplicate literal '{}' shadowed by earlier term", term.term);
                continue;
            }
            first_by_literal.insert(term.term.clone(), idx);
        }

        Self {
            terms,
            first_by_literal,
        }
    }

    /// Index over an analysis result's vocabulary followed by its grammar
    pub fn from_analysis(analysis: &CorpusAnalysis) -> Self {
        Self::build(analysis.terms())
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn terms(&self) -> &[AnnotatedTerm] {
        &self.terms
    }

    pub fn iter(&self) -> impl Iterator<Item = &AnnotatedTerm> {
        self.terms.iter()
    }

    /// Distinct literals in priority order
    pub fn literals(&self) -> impl Iterator<Item = &str> {
        self.terms
            .iter()
            .enumerate()
            .filter(|(idx, t)| self.first_by_literal.get(&t.term) == Some(idx))
            .map(|(_, t)| t.term.as_str())
    }

    /// The earliest-indexed term whose literal equals `literal`
    pub fn find(&self, literal: &str) -> Option<&AnnotatedTerm> {
        self.first_by_literal
            .get(literal)
            .and_then(|idx| self.terms.get(*idx))
    }
}

fn grapheme_len(text: &str) -> usize {
    text.graphemes(true).count()
}

#[cfg(test)]
mod tests {
    use vibedict_types::TermKind;

    use super::*;

    fn term(text: &str, kind: TermKind) -> AnnotatedTerm {
        AnnotatedTerm {
            term: text.to_string(),
            kind,
            pronunciation: None,
            explanation: format!("about {text}"),
            examples: vec![],
        }
    }

    #[test]
    fn longest_first_and_stable() {
        let index = TextAnnotationIndex::build(vec![
            term("ab", TermKind::Vocabulary),
            term("xyzw", TermKind::Vocabulary),
            term("cd", TermKind::Vocabulary),
            term("ef", TermKind::Grammar),
            term("ghij", TermKind::Grammar),
        ]);

        let order: Vec<&str> = index.iter().map(|t| t.term.as_str()).collect();
        assert_eq!(order, vec!["xyzw", "ghij", "ab", "cd", "ef"]);
    }

    #[test]
    fn length_counts_graphemes_not_bytes() {
        // 3 bytes per kana, but 2 graphemes vs 3 ascii letters
        let index = TextAnnotationIndex::build(vec![
            term("ねこ", TermKind::Vocabulary),
            term("cat", TermKind::Vocabulary),
        ]);
        assert_eq!(index.terms()[0].term, "cat");

        // flag emoji is a single grapheme made of two code points
        let index = TextAnnotationIndex::build(vec![
            term("🇯🇵", TermKind::Vocabulary),
            term("ab", TermKind::Vocabulary),
        ]);
        assert_eq!(index.terms()[0].term, "ab");
    }

    #[test]
    fn blank_terms_are_excluded() {
        let index = TextAnnotationIndex::build(vec![
            term("", TermKind::Vocabulary),
            term("   ", TermKind::Grammar),
            term("ok", TermKind::Grammar),
        ]);
        assert_eq!(index.len(), 1);
        assert!(TextAnnotationIndex::build(Vec::new()).is_empty());
    }

    #[test]
    fn identical_literals_resolve_to_first() {
        let index = TextAnnotationIndex::build(vec![
            term("は", TermKind::Vocabulary),
            term("は", TermKind::Grammar),
        ]);

        assert_eq!(index.len(), 2);
        assert_eq!(index.literals().count(), 1);
        assert_eq!(index.find("は").map(|t| t.kind), Some(TermKind::Vocabulary));
        assert!(index.find("が").is_none());
    }
}
