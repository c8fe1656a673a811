use std::env;

use serde::{Deserialize, Serialize};

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_text_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_image_model() -> String {
    "gemini-2.5-flash-image".to_string()
}

fn default_tts_model() -> String {
    "gemini-2.5-flash-preview-tts".to_string()
}

fn default_voice() -> String {
    "Kore".to_string()
}

fn default_timeout_seconds() -> u64 {
    60
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct GeminiConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_text_model")]
    pub text_model: String,
    #[serde(default = "default_image_model")]
    pub image_model: String,
    #[serde(default = "default_tts_model")]
    pub tts_model: String,
    /// Prebuilt voice used for speech synthesis
    #[serde(default = "default_voice")]
    pub voice: String,
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

impl GeminiConfig {
    pub fn new() -> Self {
        let api_key = env::var("GEMINI_API_KEY")
            .or_else(|_| env::var("API_KEY"))
            .unwrap_or_default();

        let base_url = env::var("GEMINI_BASE_URL").unwrap_or_else(|_| default_base_url());

        let timeout_seconds = env::var("TIMEOUT_SECONDS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or_else(default_timeout_seconds);

        Self {
            api_key,
            base_url,
            timeout_seconds,
            ..Self::default()
        }
    }

    /// Env values win over whatever a config file carried
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var("GEMINI_API_KEY").or_else(|_| env::var("API_KEY")) {
            self.api_key = key;
        }
        if let Ok(url) = env::var("GEMINI_BASE_URL") {
            self.base_url = url;
        }
    }
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_base_url(),
            text_model: default_text_model(),
            image_model: default_image_model(),
            tts_model: default_tts_model(),
            voice: default_voice(),
            timeout_seconds: default_timeout_seconds(),
        }
    }
}
