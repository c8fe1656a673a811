//! Prompt text and response schemas for each service operation

use serde_json::{Value, json};
use vibedict_types::Language;

pub fn define_prompt(query: &str, native: &Language, target: &Language) -> String {
    format!(
        "Explain \"{query}\" (Target: {}, Explanation Language: {}).",
        target.name, native.name
    )
}

pub fn define_system(native: &Language, target: &Language) -> String {
    let chinese = if native.is_chinese() {
        " MUST use Chinese."
    } else {
        ""
    };

    format!(
        "You are a professional dictionary. Return ONLY JSON.\n\
         - \"word\": The word itself.\n\
         - \"pronunciation\": Provide pronunciation. If English: use IPA (e.g., /əˈmeɪzɪŋ/). \
         If Japanese: use Romaji + Pitch Accent description (e.g., sensei [seɴseː] LHH). \
         Others: standard phonetic symbols.\n\
         - \"explanation\": Short definition in {native}.{chinese}\n\
         - \"examples\": 2 sentences in {target} + translations in {native}.\n\
         - \"usageNotes\": Vibe/context in {native}.{chinese}",
        native = native.name,
        target = target.name,
    )
}

pub fn define_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "word": { "type": "STRING" },
            "pronunciation": { "type": "STRING" },
            "explanation": { "type": "STRING" },
            "examples": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "target": { "type": "STRING" },
                        "native": { "type": "STRING" }
                    },
                    "required": ["target", "native"]
                }
            },
            "usageNotes": { "type": "STRING" }
        },
        "required": ["word", "pronunciation", "explanation", "examples", "usageNotes"]
    })
}

pub fn analyze_prompt(text: &str, native_name: &str) -> String {
    format!("Analyze for a {native_name} speaker: \"{text}\"")
}

pub fn analyze_system(native_name: &str) -> String {
    let chinese = if native_name.to_lowercase().contains("chinese") {
        " Use professional Chinese for everything."
    } else {
        ""
    };

    format!(
        "Analyze text and return JSON.\n\
         1. Detect source language.\n\
         2. If Japanese, use 漢字[かんじ] for Kanji in 'original' strings.\n\
         3. Translate sentences into {native_name}.\n\
         4. Summary and explanations MUST be in {native_name}.{chinese}\n\
         5. Extract vocabulary/grammar.\n\
         6. For vocabulary \"pronunciation\": English: IPA symbols. \
         Japanese: Romaji + Pitch Accent. Others: Relevant phonetics."
    )
}

fn string_list() -> Value {
    json!({ "type": "ARRAY", "items": { "type": "STRING" } })
}

pub fn analyze_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "detectedLang": { "type": "STRING" },
            "summary": { "type": "STRING" },
            "sentences": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "original": { "type": "STRING" },
                        "translated": { "type": "STRING" }
                    },
                    "required": ["original", "translated"]
                }
            },
            "vocabulary": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "term": { "type": "STRING" },
                        "pronunciation": { "type": "STRING" },
                        "explanation": { "type": "STRING" },
                        "examples": string_list()
                    },
                    "required": ["term", "pronunciation", "explanation", "examples"]
                }
            },
            "grammar": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "point": { "type": "STRING" },
                        "explanation": { "type": "STRING" },
                        "examples": string_list()
                    },
                    "required": ["point", "explanation", "examples"]
                }
            }
        },
        "required": ["detectedLang", "summary", "sentences", "vocabulary", "grammar"]
    })
}

pub fn story_prompt(words: &[String], native_name: &str) -> String {
    format!("Story in {native_name} using: {}.", words.join(", "))
}

pub fn chat_system(word: &str) -> String {
    format!("Coach for \"{word}\".")
}

pub fn image_prompt(word: &str, lang: &str) -> String {
    format!(
        "High-quality minimalist 3D conceptual icon for \"{word}\" ({lang}). \
         White background, studio lighting."
    )
}

pub fn speech_config(voice: &str) -> Value {
    json!({
        "voiceConfig": {
            "prebuiltVoiceConfig": { "voiceName": voice }
        }
    })
}
