use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use vibedict_types::AppEvent;

use crate::state::AppState;

pub mod analyze;
pub mod chat;
pub mod library;
pub mod lookup;
pub mod speak;
pub mod story;
pub mod text_input;

use analyze::handle_analysis;
use chat::handle_chat;
use library::{
    handle_list_corpus, handle_list_notebook, handle_open_corpus_item, handle_remove_corpus_item,
    handle_remove_word, handle_review, handle_save_word, handle_setup,
};
use lookup::handle_lookup;
use speak::handle_speak;
use story::handle_story;
use text_input::handle_text_input;

/// App's main loop
pub async fn event_loop(
    state: Arc<AppState>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    app_to_ui_tx.send(AppEvent::BackendReady).await?;

    tracing::info!("Event loop started");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = ui_to_app_rx.recv() => event?,
        };

        tracing::debug!("Event received: {:?}", std::mem::discriminant(&event));
        handle_events(state.clone(), &app_to_ui_tx, event).await?;
    }

    tracing::info!("Event loop stopped");
    Ok(())
}

/// Run one backend event to completion. Display events produced on the way
/// go to `app_to_ui_tx`.
pub async fn handle_events(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    event: AppEvent,
) -> anyhow::Result<()> {
    match event {
        AppEvent::TextInput(text) => {
            handle_text_input(state, app_to_ui_tx, text).await?;
        }
        AppEvent::LookupWord { query, save } => {
            handle_lookup(state, app_to_ui_tx, &query, save).await?;
        }
        AppEvent::AnalyzeText(text) => {
            handle_analysis(state, app_to_ui_tx, text).await?;
        }
        AppEvent::SaveWord(definition) => {
            handle_save_word(state, app_to_ui_tx, definition).await?;
        }
        AppEvent::RemoveWord(id) => {
            handle_remove_word(state, app_to_ui_tx, &id).await?;
        }
        AppEvent::RemoveCorpusItem(id) => {
            handle_remove_corpus_item(state, app_to_ui_tx, &id).await?;
        }
        AppEvent::OpenCorpusItem(id) => {
            handle_open_corpus_item(state, app_to_ui_tx, &id).await?;
        }
        AppEvent::ListNotebook => {
            handle_list_notebook(state, app_to_ui_tx).await?;
        }
        AppEvent::ListCorpus => {
            handle_list_corpus(state, app_to_ui_tx).await?;
        }
        AppEvent::ReviewCards => {
            handle_review(state, app_to_ui_tx).await?;
        }
        AppEvent::GenerateStory => {
            handle_story(state, app_to_ui_tx).await?;
        }
        AppEvent::Chat { word, message } => {
            handle_chat(state, app_to_ui_tx, word, message).await?;
        }
        AppEvent::Speak { text, out } => {
            handle_speak(state, app_to_ui_tx, &text, out.as_deref()).await?;
        }
        AppEvent::Setup { native, target } => {
            handle_setup(state, app_to_ui_tx, &native, &target).await?;
        }
        // UI-only events
        AppEvent::UiEvent(_)
        | AppEvent::ShowDefinition(_)
        | AppEvent::ShowCorpusItem(_)
        | AppEvent::ShowNotebook(_)
        | AppEvent::ShowCorpus(_)
        | AppEvent::ShowFlashcards(_)
        | AppEvent::ShowStory(_)
        | AppEvent::ShowChatReply { .. }
        | AppEvent::StatusUpdate { .. }
        | AppEvent::BackendReady => {}
    }

    Ok(())
}

pub(crate) async fn send_status(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    status: impl Into<String>,
    busy: bool,
) -> anyhow::Result<()> {
    app_to_ui_tx
        .send(AppEvent::StatusUpdate {
            status: status.into(),
            busy,
        })
        .await?;
    Ok(())
}
