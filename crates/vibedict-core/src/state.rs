use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

use uuid::Uuid;
use vibedict_config::languages;
use vibedict_types::{CorpusAnalysis, CorpusItem, Language, SavedWord, StoredState, WordDefinition};

use crate::error::CoreError;
use crate::preprocess::title_for;

/// Load/save capability for the persisted application document
pub trait StateStore: Send + Sync {
    /// `Ok(None)` when nothing was stored yet
    fn load(&self) -> Result<Option<StoredState>, CoreError>;

    fn save(&self, state: &StoredState) -> Result<(), CoreError>;
}

impl<T: StateStore + ?Sized> StateStore for Box<T> {
    fn load(&self) -> Result<Option<StoredState>, CoreError> {
        (**self).load()
    }

    fn save(&self, state: &StoredState) -> Result<(), CoreError> {
        (**self).save(state)
    }
}

/// Store that keeps the document in memory only
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Option<StoredState>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_state(state: StoredState) -> Self {
        Self {
            inner: Mutex::new(Some(state)),
        }
    }

    pub fn snapshot(&self) -> Option<StoredState> {
        self.inner.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StateStore for MemoryStore {
    fn load(&self) -> Result<Option<StoredState>, CoreError> {
        let guard = self
            .inner
            .lock()
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn save(&self, state: &StoredState) -> Result<(), CoreError> {
        let mut guard = self
            .inner
            .lock()
            .map_err(|e| CoreError::Storage(e.to_string()))?;
        *guard = Some(state.clone());
        Ok(())
    }
}

/// The user's notebook and corpus, flushed to the store on every mutation
pub struct Library<S: StateStore> {
    store: S,
    state: StoredState,
}

impl<S: StateStore> Library<S> {
    /// Load from `store`; missing or unreadable state starts fresh
    pub fn open(store: S) -> Self {
        let state = match store.load() {
            Ok(Some(state)) => {
                tracing::info!(
                    "Loaded state: {} saved words, {} corpus items",
                    state.notebook.len(),
                    state.corpus.len()
                );
                state
            }
            Ok(None) => {
                tracing::info!("No stored state, starting fresh");
                default_state()
            }
            Err(e) => {
                tracing::error!("Failed to load state, starting fresh: {}", e);
                default_state()
            }
        };

        Self { store, state }
    }

    pub fn state(&self) -> &StoredState {
        &self.state
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn notebook(&self) -> &[SavedWord] {
        &self.state.notebook
    }

    pub fn corpus(&self) -> &[CorpusItem] {
        &self.state.corpus
    }

    pub fn native_lang(&self) -> &Language {
        &self.state.native_lang
    }

    pub fn target_lang(&self) -> &Language {
        &self.state.target_lang
    }

    pub fn is_setup_complete(&self) -> bool {
        self.state.setup_complete
    }

    /// Put `definition` at the top of the notebook, replacing an older
    /// entry for the same word
    pub fn save_word(&mut self, definition: WordDefinition) -> Result<&SavedWord, CoreError> {
        let saved = SavedWord {
            definition,
            id: new_id(),
            added_at: now_millis(),
        };

        let mut next = self.state.clone();
        next.notebook.retain(|w| w.definition.word != saved.definition.word);
        let word = saved.definition.word.clone();
        next.notebook.insert(0, saved);
        self.commit(next)?;
        tracing::info!("Saved word '{}'", word);

        Ok(&self.state.notebook[0])
    }

    /// Returns whether an entry was removed
    pub fn remove_word(&mut self, id: &str) -> Result<bool, CoreError> {
        if !self.state.notebook.iter().any(|w| w.id == id) {
            return Ok(false);
        }

        let mut next = self.state.clone();
        next.notebook.retain(|w| w.id != id);
        self.commit(next)?;
        Ok(true)
    }

    pub fn save_corpus_item(
        &mut self,
        content: String,
        analysis: CorpusAnalysis,
    ) -> Result<&CorpusItem, CoreError> {
        let item = CorpusItem {
            id: new_id(),
            title: title_for(&content),
            content,
            analysis,
            added_at: now_millis(),
        };

        let mut next = self.state.clone();
        next.corpus.insert(0, item);
        self.commit(next)?;
        tracing::info!(
            "Saved corpus item '{}' ({})",
            self.state.corpus[0].title,
            self.state.corpus[0].id
        );

        Ok(&self.state.corpus[0])
    }

    pub fn remove_corpus_item(&mut self, id: &str) -> Result<bool, CoreError> {
        if self.corpus_item(id).is_none() {
            return Ok(false);
        }

        let mut next = self.state.clone();
        next.corpus.retain(|item| item.id != id);
        self.commit(next)?;
        Ok(true)
    }

    pub fn corpus_item(&self, id: &str) -> Option<&CorpusItem> {
        self.state.corpus.iter().find(|item| item.id == id)
    }

    pub fn finish_setup(&mut self, native: Language, target: Language) -> Result<(), CoreError> {
        let mut next = self.state.clone();
        next.native_lang = native;
        next.target_lang = target;
        next.setup_complete = true;
        self.commit(next)?;
        tracing::info!(
            "Languages set: {} -> {}",
            self.state.native_lang.name,
            self.state.target_lang.name
        );
        Ok(())
    }

    /// Like [`Library::finish_setup`] but from codes or names
    pub fn finish_setup_by_name(&mut self, native: &str, target: &str) -> Result<(), CoreError> {
        let native = languages::find_language(native)
            .ok_or_else(|| CoreError::UnknownLanguage(native.to_string()))?;
        let target = languages::find_language(target)
            .ok_or_else(|| CoreError::UnknownLanguage(target.to_string()))?;
        self.finish_setup(native, target)
    }

    /// Memory only changes once the store accepted `next`
    fn commit(&mut self, next: StoredState) -> Result<(), CoreError> {
        self.store.save(&next)?;
        self.state = next;
        Ok(())
    }
}

fn default_state() -> StoredState {
    StoredState::new(languages::default_native(), languages::default_target())
}

fn new_id() -> String {
    Uuid::new_v4().simple().to_string()
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicBool, Ordering};

    use super::*;

    struct FailingStore;

    impl StateStore for FailingStore {
        fn load(&self) -> Result<Option<StoredState>, CoreError> {
            Err(CoreError::Storage("corrupt".into()))
        }

        fn save(&self, _state: &StoredState) -> Result<(), CoreError> {
            Err(CoreError::Storage("read-only".into()))
        }
    }

    fn definition(word: &str, explanation: &str) -> WordDefinition {
        WordDefinition {
            word: word.into(),
            pronunciation: None,
            explanation: explanation.into(),
            examples: vec![],
            usage_notes: String::new(),
            image_url: None,
        }
    }

    fn analysis() -> CorpusAnalysis {
        CorpusAnalysis {
            detected_lang: "English".into(),
            summary: "s".into(),
            sentences: vec![],
            vocabulary: vec![],
            grammar: vec![],
        }
    }

    #[test]
    fn fresh_library_uses_default_languages() {
        let library = Library::open(MemoryStore::new());
        assert_eq!(library.native_lang(), &languages::default_native());
        assert_eq!(library.target_lang(), &languages::default_target());
        assert!(!library.is_setup_complete());
    }

    #[test]
    fn saving_same_word_replaces_and_moves_to_top() {
        let mut library = Library::open(MemoryStore::new());
        library.save_word(definition("cat", "old")).unwrap();
        library.save_word(definition("dog", "dog")).unwrap();
        library.save_word(definition("cat", "new")).unwrap();

        let words: Vec<&str> = library
            .notebook()
            .iter()
            .map(|w| w.definition.explanation.as_str())
            .collect();
        assert_eq!(words, vec!["new", "dog"]);
    }

    #[test]
    fn every_mutation_is_flushed() {
        let mut library = Library::open(MemoryStore::new());
        let id = library.save_word(definition("cat", "x")).unwrap().id.clone();
        assert_eq!(library.store().snapshot().unwrap().notebook.len(), 1);

        assert!(library.remove_word(&id).unwrap());
        assert!(library.store().snapshot().unwrap().notebook.is_empty());
        assert!(!library.remove_word(&id).unwrap());
    }

    #[test]
    fn corpus_items_are_prepended_with_titles() {
        let mut library = Library::open(MemoryStore::new());
        library
            .save_corpus_item("first".into(), analysis())
            .unwrap();
        let long = "a".repeat(40);
        let id = library.save_corpus_item(long, analysis()).unwrap().id.clone();

        assert_eq!(library.corpus()[0].id, id);
        assert_eq!(library.corpus()[0].title, format!("{}...", "a".repeat(30)));
        assert!(library.corpus_item(&id).is_some());

        assert!(library.remove_corpus_item(&id).unwrap());
        assert!(library.corpus_item(&id).is_none());
        assert_eq!(library.corpus().len(), 1);
    }

    #[test]
    fn reopening_restores_state() {
        let store = MemoryStore::new();
        let mut library = Library::open(store);
        library.finish_setup_by_name("ja", "English").unwrap();
        let snapshot = library.store().snapshot().unwrap();

        let reopened = Library::open(MemoryStore::with_state(snapshot));
        assert!(reopened.is_setup_complete());
        assert_eq!(reopened.native_lang().code, "ja");
        assert_eq!(reopened.target_lang().code, "en");
    }

    #[test]
    fn unknown_language_is_rejected() {
        let mut library = Library::open(MemoryStore::new());
        assert!(matches!(
            library.finish_setup_by_name("xx", "en"),
            Err(CoreError::UnknownLanguage(_))
        ));
    }

    #[test]
    fn broken_store_degrades_to_defaults() {
        let mut library = Library::open(FailingStore);
        assert!(library.notebook().is_empty());
        assert!(library.save_word(definition("cat", "x")).is_err());
        assert!(library.notebook().is_empty());
    }

    /// Accepts writes until `fail` is set
    #[derive(Default)]
    struct FlakyStore {
        inner: MemoryStore,
        fail: AtomicBool,
    }

    impl FlakyStore {
        fn break_writes(&self) {
            self.fail.store(true, Ordering::SeqCst);
        }
    }

    impl StateStore for FlakyStore {
        fn load(&self) -> Result<Option<StoredState>, CoreError> {
            self.inner.load()
        }

        fn save(&self, state: &StoredState) -> Result<(), CoreError> {
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::Storage("disk full".into()));
            }
            self.inner.save(state)
        }
    }

    #[test]
    fn failed_flush_leaves_memory_matching_store() {
        let mut library = Library::open(FlakyStore::default());
        let id = library.save_word(definition("cat", "x")).unwrap().id.clone();
        let item = library
            .save_corpus_item("text".into(), analysis())
            .unwrap()
            .id
            .clone();
        library.store().break_writes();

        assert!(library.save_word(definition("dog", "y")).is_err());
        assert!(library.remove_word(&id).is_err());
        assert!(library.save_corpus_item("more".into(), analysis()).is_err());
        assert!(library.remove_corpus_item(&item).is_err());
        assert!(library.finish_setup_by_name("ja", "en").is_err());

        assert_eq!(library.notebook().len(), 1);
        assert_eq!(library.notebook()[0].id, id);
        assert_eq!(library.corpus().len(), 1);
        assert!(!library.is_setup_complete());
        assert_eq!(library.store().inner.snapshot().unwrap(), *library.state());
    }
}
