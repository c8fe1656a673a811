use std::time::Duration;

use async_trait::async_trait;
use reqwest::{StatusCode, Url};
use vibedict_config::gemini::GeminiConfig;
use vibedict_types::{ChatMessage, CorpusAnalysis, Language, WordDefinition};

use crate::wire::{GenerateRequest, GenerateResponse, GenerationConfig};
use crate::{LanguageService, ProviderMetadata, ServiceError, SpeechAudio, prompts};

const SPEECH_SAMPLE_RATE: u32 = 24_000;
const PLACEHOLDER_IMAGE_HOST: &str = "https://picsum.photos";

#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Result<Self, ServiceError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self { client, config })
    }

    fn endpoint(&self, model: &str) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            model
        )
    }

    async fn generate(
        &self,
        model: &str,
        request: &GenerateRequest,
    ) -> Result<GenerateResponse, ServiceError> {
        if self.config.api_key.is_empty() {
            return Err(ServiceError::AuthenticationError);
        }

        tracing::debug!("generateContent on {}", model);

        let response = self
            .client
            .post(self.endpoint(model))
            .header("x-goog-api-key", &self.config.api_key)
            .json(request)
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(ServiceError::RateLimitExceeded);
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ServiceError::AuthenticationError);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ServiceError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        response
            .json::<GenerateResponse>()
            .await
            .map_err(|e| ServiceError::ApiError(format!("Failed to parse response: {}", e)))
    }

    async fn fetch_image(&self, word: &str, lang: &str) -> Result<String, ServiceError> {
        let request = GenerateRequest::prompt(prompts::image_prompt(word, lang)).with_config(
            GenerationConfig {
                image_config: Some(serde_json::json!({ "aspectRatio": "1:1" })),
                ..GenerationConfig::default()
            },
        );

        let response = self.generate(&self.config.image_model, &request).await?;
        let image = response.inline_data().ok_or(ServiceError::EmptyResponse)?;

        Ok(format!("data:image/png;base64,{}", image.data))
    }
}

/// Deterministic stand-in image for `word`
pub fn placeholder_image_url(word: &str) -> String {
    let Ok(mut url) = Url::parse(PLACEHOLDER_IMAGE_HOST) else {
        return String::new();
    };

    if let Ok(mut segments) = url.path_segments_mut() {
        segments.pop_if_empty().extend(["seed", word, "400", "400"]);
    }

    url.to_string()
}

#[async_trait]
impl LanguageService for GeminiClient {
    async fn define_word(
        &self,
        query: &str,
        native: &Language,
        target: &Language,
    ) -> Result<WordDefinition, ServiceError> {
        let request = GenerateRequest::prompt(prompts::define_prompt(query, native, target))
            .with_system(prompts::define_system(native, target))
            .with_config(GenerationConfig::json(prompts::define_schema()));

        let response = self.generate(&self.config.text_model, &request).await?;
        let mut definition: WordDefinition = response.json()?;
        definition.pronunciation = definition.pronunciation.filter(|p| !p.trim().is_empty());

        tracing::info!("Defined '{}'", definition.word);
        Ok(definition)
    }

    async fn analyze_corpus(
        &self,
        text: &str,
        native_name: &str,
    ) -> Result<CorpusAnalysis, ServiceError> {
        let request = GenerateRequest::prompt(prompts::analyze_prompt(text, native_name))
            .with_system(prompts::analyze_system(native_name))
            .with_config(GenerationConfig::json(prompts::analyze_schema()));

        let response = self.generate(&self.config.text_model, &request).await?;
        let analysis: CorpusAnalysis = response.json()?;

        tracing::info!(
            "Analyzed {} text: {} sentences, {} vocabulary, {} grammar",
            analysis.detected_lang,
            analysis.sentences.len(),
            analysis.vocabulary.len(),
            analysis.grammar.len()
        );
        Ok(analysis)
    }

    async fn generate_story(&self, words: &[String], native_name: &str) -> Result<String, ServiceError> {
        let request = GenerateRequest::prompt(prompts::story_prompt(words, native_name));
        let response = self.generate(&self.config.text_model, &request).await?;
        response.text().ok_or(ServiceError::EmptyResponse)
    }

    async fn chat_about_word(
        &self,
        word: &str,
        history: &[ChatMessage],
        message: &str,
    ) -> Result<String, ServiceError> {
        let request =
            GenerateRequest::conversation(history, message).with_system(prompts::chat_system(word));
        let response = self.generate(&self.config.text_model, &request).await?;
        response.text().ok_or(ServiceError::EmptyResponse)
    }

    async fn concept_image(&self, word: &str, lang: &str) -> String {
        match self.fetch_image(word, lang).await {
            Ok(url) => url,
            Err(e) => {
                tracing::warn!("Concept image for '{}' failed, using placeholder: {}", word, e);
                placeholder_image_url(word)
            }
        }
    }

    async fn speak(&self, text: &str, _lang: &str) -> Result<Option<SpeechAudio>, ServiceError> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let request = GenerateRequest::prompt(text).with_config(GenerationConfig {
            response_modalities: Some(vec!["AUDIO".to_string()]),
            speech_config: Some(prompts::speech_config(&self.config.voice)),
            ..GenerationConfig::default()
        });

        let response = self.generate(&self.config.tts_model, &request).await?;

        Ok(response.inline_data().map(|audio| SpeechAudio {
            data: audio.data.clone(),
            sample_rate: SPEECH_SAMPLE_RATE,
            channels: 1,
        }))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            text_model: self.config.text_model.clone(),
            requires_api_key: true,
        }
    }
}
