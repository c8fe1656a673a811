use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_types::{AppEvent, ChatMessage};

use super::send_status;
use crate::state::AppState;

pub async fn handle_chat(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    word: String,
    message: String,
) -> anyhow::Result<()> {
    let message = message.trim().to_string();
    if word.trim().is_empty() || message.is_empty() {
        return send_status(app_to_ui_tx, "Usage: chat <word> <message>", false).await;
    }

    let history = state
        .chats
        .lock()
        .await
        .get(&word)
        .cloned()
        .unwrap_or_default();

    send_status(app_to_ui_tx, format!("Asking about '{}'...", word), true).await?;

    let reply = match state
        .service
        .chat_about_word(&word, &history, &message)
        .await
    {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("Chat about '{}' failed: {}", word, e);
            return send_status(app_to_ui_tx, format!("Chat failed: {}", e), false).await;
        }
    };

    {
        let mut chats = state.chats.lock().await;
        let thread = chats.entry(word.clone()).or_default();
        thread.push(ChatMessage::user(message));
        thread.push(ChatMessage::model(reply.clone()));
        tracing::debug!("Chat about '{}' has {} messages", word, thread.len());
    }

    app_to_ui_tx
        .send(AppEvent::ShowChatReply { word, reply })
        .await?;
    Ok(())
}
