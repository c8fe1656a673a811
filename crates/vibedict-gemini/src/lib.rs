mod client;
pub mod prompts;
pub mod wire;

pub use client::GeminiClient;

use vibedict_types::{ChatMessage, CorpusAnalysis, Language, WordDefinition};

/// Generative-AI backend for every linguistic operation
#[async_trait::async_trait]
pub trait LanguageService: Send + Sync {
    /// Dictionary entry for `query`, explained in the native language
    async fn define_word(
        &self,
        query: &str,
        native: &Language,
        target: &Language,
    ) -> Result<WordDefinition, ServiceError>;

    /// Sentence split, translation, vocabulary and grammar for a pasted text
    async fn analyze_corpus(
        &self,
        text: &str,
        native_name: &str,
    ) -> Result<CorpusAnalysis, ServiceError>;

    /// Short story that uses all of `words`
    async fn generate_story(&self, words: &[String], native_name: &str) -> Result<String, ServiceError>;

    /// One tutoring turn about `word`
    async fn chat_about_word(
        &self,
        word: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ServiceError>;

    /// Image URL illustrating `word`; never fails, falls back to a placeholder
    async fn concept_image(&self, word: &str, lang: &str) -> String;

    /// Synthesized speech, `None` for empty text
    async fn speak(&self, text: &str, lang: &str) -> Result<Option<SpeechAudio>, ServiceError>;

    fn metadata(&self) -> ProviderMetadata;
}

/// Raw PCM speech as returned by the service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpeechAudio {
    /// Base64 encoded signed 16-bit little-endian PCM
    pub data: String,
    pub sample_rate: u32,
    pub channels: u16,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub text_model: String,
    pub requires_api_key: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Empty response from model")]
    EmptyResponse,

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}
