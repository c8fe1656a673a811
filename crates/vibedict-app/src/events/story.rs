use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_types::AppEvent;

use super::send_status;
use crate::state::AppState;

/// Words handed to the story prompt, newest first
const MAX_STORY_WORDS: usize = 10;

pub async fn handle_story(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (words, native_name) = {
        let library = state.library.lock().await;
        let words: Vec<String> = library
            .notebook()
            .iter()
            .take(MAX_STORY_WORDS)
            .map(|w| w.definition.word.clone())
            .collect();
        (words, library.native_lang().name.clone())
    };

    if words.is_empty() {
        return send_status(app_to_ui_tx, "Notebook is empty, save some words first", false).await;
    }

    send_status(app_to_ui_tx, format!("Writing a story with {} words...", words.len()), true).await?;

    match state.service.generate_story(&words, &native_name).await {
        Ok(story) => {
            app_to_ui_tx.send(AppEvent::ShowStory(story)).await?;
            Ok(())
        }
        Err(e) => {
            tracing::error!("Story generation failed: {}", e);
            send_status(app_to_ui_tx, format!("Story failed: {}", e), false).await
        }
    }
}
