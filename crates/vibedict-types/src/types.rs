use std::path::PathBuf;

use crate::model::{CorpusItem, SavedWord, WordDefinition};

#[derive(Debug, Clone, PartialEq)]
pub enum AppEvent {
    UiEvent(UiEvent),
    /// Free text typed by the user, routed to a lookup or an analysis
    TextInput(String),
    LookupWord {
        query: String,
        save: bool,
    },
    AnalyzeText(String),
    SaveWord(WordDefinition),
    RemoveWord(String),
    RemoveCorpusItem(String),
    OpenCorpusItem(String),
    ListNotebook,
    ListCorpus,
    GenerateStory,
    Chat {
        word: String,
        message: String,
    },
    /// Synthesize speech, optionally writing the raw PCM to `out`
    Speak {
        text: String,
        out: Option<PathBuf>,
    },
    ReviewCards,
    Setup {
        native: String,
        target: String,
    },
    ShowDefinition(WordDefinition),
    ShowCorpusItem(CorpusItem),
    ShowNotebook(Vec<SavedWord>),
    ShowCorpus(Vec<CorpusItem>),
    ShowFlashcards(Vec<SavedWord>),
    ShowStory(String),
    ShowChatReply {
        word: String,
        reply: String,
    },
    StatusUpdate {
        status: String,
        busy: bool,
    },
    BackendReady,
}

#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Select the n-th highlighted span of the open corpus item
    SelectSpan(usize),
    /// Select the n-th vocabulary list entry
    SelectVocabulary(usize),
    /// Select the n-th grammar list entry
    SelectGrammar(usize),
    Dismiss,
    /// Keep the last shown definition in the notebook
    SaveDefinition,
    FlipCard,
    NextCard,
    PrevCard,
    Help,
    Close,
}
