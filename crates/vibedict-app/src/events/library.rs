//! Notebook, corpus and language setup

use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_types::{AppEvent, WordDefinition};

use super::send_status;
use crate::state::AppState;

pub async fn handle_save_word(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    definition: WordDefinition,
) -> anyhow::Result<()> {
    let word = definition.word.clone();
    let result = state.library.lock().await.save_word(definition).map(|_| ());

    match result {
        Ok(()) => send_status(app_to_ui_tx, format!("Saved '{}'", word), false).await,
        Err(e) => {
            tracing::error!("Failed to save '{}': {}", word, e);
            send_status(app_to_ui_tx, format!("Could not save: {}", e), false).await
        }
    }
}

pub async fn handle_remove_word(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: &str,
) -> anyhow::Result<()> {
    let result = {
        let mut library = state.library.lock().await;
        let ids = library.notebook().iter().map(|w| w.id.as_str());
        match resolve_id(ids, id) {
            Some(full_id) => library.remove_word(&full_id),
            None => Ok(false),
        }
    };

    let status = match result {
        Ok(true) => format!("Removed word {}", id),
        Ok(false) => format!("No saved word with id {}", id),
        Err(e) => {
            tracing::error!("Failed to remove word {}: {}", id, e);
            format!("Could not remove: {}", e)
        }
    };

    send_status(app_to_ui_tx, status, false).await
}

pub async fn handle_remove_corpus_item(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: &str,
) -> anyhow::Result<()> {
    let result = {
        let mut library = state.library.lock().await;
        let ids = library.corpus().iter().map(|item| item.id.as_str());
        match resolve_id(ids, id) {
            Some(full_id) => library.remove_corpus_item(&full_id),
            None => Ok(false),
        }
    };

    let status = match result {
        Ok(true) => format!("Removed corpus item {}", id),
        Ok(false) => format!("No corpus item matches {}", id),
        Err(e) => {
            tracing::error!("Failed to remove corpus item {}: {}", id, e);
            format!("Could not remove: {}", e)
        }
    };

    send_status(app_to_ui_tx, status, false).await
}

pub async fn handle_open_corpus_item(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    id: &str,
) -> anyhow::Result<()> {
    let item = {
        let library = state.library.lock().await;
        resolve_id(library.corpus().iter().map(|item| item.id.as_str()), id)
            .and_then(|full_id| library.corpus_item(&full_id).cloned())
    };

    match item {
        Some(item) => {
            app_to_ui_tx.send(AppEvent::ShowCorpusItem(item)).await?;
            Ok(())
        }
        None => send_status(app_to_ui_tx, format!("No corpus item matches {}", id), false).await,
    }
}

pub async fn handle_list_notebook(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let words = state.library.lock().await.notebook().to_vec();
    app_to_ui_tx.send(AppEvent::ShowNotebook(words)).await?;
    Ok(())
}

pub async fn handle_list_corpus(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let items = state.library.lock().await.corpus().to_vec();
    app_to_ui_tx.send(AppEvent::ShowCorpus(items)).await?;
    Ok(())
}

pub async fn handle_review(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let words = state.library.lock().await.notebook().to_vec();
    if words.is_empty() {
        return send_status(app_to_ui_tx, "Notebook is empty, save some words first", false).await;
    }

    app_to_ui_tx.send(AppEvent::ShowFlashcards(words)).await?;
    Ok(())
}

pub async fn handle_setup(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    native: &str,
    target: &str,
) -> anyhow::Result<()> {
    let status = {
        let mut library = state.library.lock().await;
        match library.finish_setup_by_name(native, target) {
            Ok(()) => format!(
                "Learning {} {} from {} {}",
                library.target_lang().flag,
                library.target_lang().name,
                library.native_lang().flag,
                library.native_lang().name
            ),
            Err(e) => {
                tracing::warn!("Setup rejected: {}", e);
                format!("Setup failed: {}", e)
            }
        }
    };

    send_status(app_to_ui_tx, status, false).await
}

/// Exact id, or a prefix matching exactly one id
pub fn resolve_id<'a>(ids: impl Iterator<Item = &'a str> + Clone, id: &str) -> Option<String> {
    if id.is_empty() {
        return None;
    }

    if let Some(exact) = ids.clone().find(|candidate| *candidate == id) {
        return Some(exact.to_string());
    }

    let mut matches = ids.filter(|candidate| candidate.starts_with(id));
    match (matches.next(), matches.next()) {
        (Some(only), None) => Some(only.to_string()),
        _ => None,
    }
}
