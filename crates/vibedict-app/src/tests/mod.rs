
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use vibedict_config::Config;
use vibedict_core::state::{MemoryStore, StateStore};
use vibedict_gemini::{LanguageService, ProviderMetadata, ServiceError, SpeechAudio};
use vibedict_types::{
    ChatMessage, CorpusAnalysis, GrammarPoint, Language, Sentence, VocabularyEntry, WordDefinition,
    WordExample,
};

use crate::state::AppState;

/// Canned answers; records every call as "<operation>:<argument>"
#[derive(Default)]
pub struct FakeService {
    pub fail: bool,
    pub calls: Mutex<Vec<String>>,
    pub chat_history_lens: Mutex<Vec<usize>>,
}

impl FakeService {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    fn record(&self, call: String) -> Result<(), ServiceError> {
        self.calls.lock().unwrap().push(call);
        if self.fail {
            Err(ServiceError::RateLimitExceeded)
        } else {
            Ok(())
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

pub fn analysis() -> CorpusAnalysis {
    CorpusAnalysis {
        detected_lang: "Japanese".into(),
        summary: "About cats".into(),
        sentences: vec![Sentence {
            original: "猫[ねこ]が好[す]き。".into(),
            translated: "I like cats.".into(),
        }],
        vocabulary: vec![VocabularyEntry {
            term: "猫[ねこ]".into(),
            pronunciation: Some("neko".into()),
            explanation: "cat".into(),
            examples: vec!["猫[ねこ]がいる".into()],
        }],
        grammar: vec![GrammarPoint {
            point: "が".into(),
            explanation: "subject marker".into(),
            examples: vec![],
        }],
    }
}

#[async_trait]
impl LanguageService for FakeService {
    async fn define_word(
        &self,
        query: &str,
        _native: &Language,
        target: &Language,
    ) -> Result<WordDefinition, ServiceError> {
        self.record(format!("define:{query}"))?;
        Ok(WordDefinition {
            word: query.to_string(),
            pronunciation: Some("/fake/".into()),
            explanation: format!("{query} in {}", target.name),
            examples: vec![WordExample {
                target: "example".into(),
                native: "translation".into(),
            }],
            usage_notes: String::new(),
            image_url: None,
        })
    }

    async fn analyze_corpus(
        &self,
        text: &str,
        _native_name: &str,
    ) -> Result<CorpusAnalysis, ServiceError> {
        self.record(format!("analyze:{text}"))?;
        Ok(analysis())
    }

    async fn generate_story(&self, words: &[String], _native_name: &str) -> Result<String, ServiceError> {
        self.record(format!("story:{}", words.join(",")))?;
        Ok(format!("Once upon a time: {}", words.join(", ")))
    }

    async fn chat_about_word(
        &self,
        word: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ServiceError> {
        self.record(format!("chat:{word}"))?;
        self.chat_history_lens.lock().unwrap().push(history.len());
        Ok(format!("About {word}: {message}"))
    }

    async fn concept_image(&self, word: &str, _lang: &str) -> String {
        format!("https://example.test/{word}.png")
    }

    async fn speak(&self, text: &str, _lang: &str) -> Result<Option<SpeechAudio>, ServiceError> {
        if text.trim().is_empty() {
            return Ok(None);
        }
        self.record(format!("speak:{text}"))?;
        Ok(Some(SpeechAudio {
            // two samples: 1 and 2
            data: "AQACAA==".into(),
            sample_rate: 24_000,
            channels: 1,
        }))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Fake".into(),
            text_model: "fake-model".into(),
            requires_api_key: false,
        }
    }
}

pub fn app_state(service: Arc<FakeService>) -> Arc<AppState> {
    app_state_with_store(service, Box::new(MemoryStore::new()))
}

pub fn app_state_with_store(service: Arc<FakeService>, store: Box<dyn StateStore>) -> Arc<AppState> {
    let config = Config {
        ui: vibedict_config::ui::UiConfig {
            color: false,
            ..Default::default()
        },
        ..Config::default()
    };
    Arc::new(AppState::new(config, store, service))
}
