use serde::{Deserialize, Serialize};

/// A selectable language with its display flag
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// ISO 639-1 code ("ja", "en", ...)
    pub code: String,
    pub name: String,
    pub flag: String,
}

impl Language {
    pub fn new(code: &str, name: &str, flag: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            flag: flag.to_string(),
        }
    }

    pub fn is_chinese(&self) -> bool {
        self.code == "zh" || self.name.to_lowercase().contains("chinese")
    }
}

/// Example sentence in the target language with its translation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordExample {
    pub target: String,
    pub native: String,
}

/// Dictionary answer for a single word lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordDefinition {
    pub word: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<WordExample>,
    #[serde(default)]
    pub usage_notes: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

/// Notebook entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedWord {
    #[serde(flatten)]
    pub definition: WordDefinition,
    pub id: String,
    /// Unix time in milliseconds
    pub added_at: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// Discriminant of a highlightable term
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermKind {
    Vocabulary,
    Grammar,
}

impl TermKind {
    pub fn label(&self) -> &'static str {
        match self {
            TermKind::Vocabulary => "Vocabulary",
            TermKind::Grammar => "Grammar",
        }
    }
}

/// A unit of highlightable knowledge extracted by corpus analysis.
///
/// `term` is the literal text to look for in sentences and may itself carry
/// ruby markup (`漢字[かんじ]`). Several terms may share the same literal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedTerm {
    pub term: String,
    pub kind: TermKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub original: String,
    pub translated: String,
}

/// Vocabulary entry as returned by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabularyEntry {
    pub term: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<String>,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Grammar point as returned by the analysis service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrammarPoint {
    pub point: String,
    pub explanation: String,
    #[serde(default)]
    pub examples: Vec<String>,
}

impl From<&VocabularyEntry> for AnnotatedTerm {
    fn from(entry: &VocabularyEntry) -> Self {
        Self {
            term: entry.term.clone(),
            kind: TermKind::Vocabulary,
            pronunciation: entry
                .pronunciation
                .clone()
                .filter(|p| !p.trim().is_empty()),
            explanation: entry.explanation.clone(),
            examples: entry.examples.clone(),
        }
    }
}

impl From<&GrammarPoint> for AnnotatedTerm {
    fn from(point: &GrammarPoint) -> Self {
        Self {
            term: point.point.clone(),
            kind: TermKind::Grammar,
            pronunciation: None,
            explanation: point.explanation.clone(),
            examples: point.examples.clone(),
        }
    }
}

/// Full result of analyzing a pasted text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusAnalysis {
    pub detected_lang: String,
    pub summary: String,
    #[serde(default)]
    pub sentences: Vec<Sentence>,
    #[serde(default)]
    pub vocabulary: Vec<VocabularyEntry>,
    #[serde(default)]
    pub grammar: Vec<GrammarPoint>,
}

impl CorpusAnalysis {
    /// Vocabulary followed by grammar, each in original order
    pub fn terms(&self) -> Vec<AnnotatedTerm> {
        self.vocabulary
            .iter()
            .map(AnnotatedTerm::from)
            .chain(self.grammar.iter().map(AnnotatedTerm::from))
            .collect()
    }
}

/// One analyzed text in the user's corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CorpusItem {
    pub id: String,
    pub title: String,
    pub content: String,
    pub analysis: CorpusAnalysis,
    /// Unix time in milliseconds
    pub added_at: u64,
}

/// The persisted application document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredState {
    pub native_lang: Language,
    pub target_lang: Language,
    #[serde(default)]
    pub notebook: Vec<SavedWord>,
    #[serde(default)]
    pub corpus: Vec<CorpusItem>,
    #[serde(default)]
    pub setup_complete: bool,
}

impl StoredState {
    pub fn new(native_lang: Language, target_lang: Language) -> Self {
        Self {
            native_lang,
            target_lang,
            notebook: Vec::new(),
            corpus: Vec::new(),
            setup_complete: false,
        }
    }
}
