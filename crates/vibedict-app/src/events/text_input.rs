use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_core::preprocess::{DefaultPreprocessor, Preprocessor};
use vibedict_types::AppEvent;

use super::analyze::handle_analysis;
use super::lookup::handle_lookup;
use super::send_status;
use crate::state::AppState;

/// Longest input still treated as a single dictionary query
const MAX_QUERY_CHARS: usize = 24;

/// Sentence-level punctuation across the supported scripts
const SENTENCE_MARKS: &[char] = &['.', '!', '?', '。', '！', '？', '\n'];

/// Free text goes to a word lookup when short, otherwise to a full analysis
pub async fn handle_text_input(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: String,
) -> anyhow::Result<()> {
    if text.trim().is_empty() {
        return send_status(app_to_ui_tx, "Nothing to look up", false).await;
    }

    if looks_like_passage(&text) {
        tracing::debug!("Text input routed to analysis ({} chars)", text.chars().count());
        handle_analysis(state, app_to_ui_tx, text).await
    } else {
        let query = DefaultPreprocessor.process(&text);
        tracing::debug!("Text input routed to lookup: '{}'", query);
        handle_lookup(state, app_to_ui_tx, &query, false).await
    }
}

pub fn looks_like_passage(text: &str) -> bool {
    let text = text.trim();
    let words = text.split_whitespace().count();

    words > 3
        || text.chars().count() > MAX_QUERY_CHARS
        || text.trim_end_matches(SENTENCE_MARKS).contains(SENTENCE_MARKS)
}
