use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_types::AppEvent;

use super::send_status;
use crate::state::AppState;

/// Analyze a pasted text and keep it in the corpus
pub async fn handle_analysis(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: String,
) -> anyhow::Result<()> {
    let content = text.trim().to_string();
    if content.is_empty() {
        return send_status(app_to_ui_tx, "Nothing to analyze", false).await;
    }

    let native_name = state.library.lock().await.native_lang().name.clone();

    send_status(app_to_ui_tx, "Analyzing text...", true).await?;

    let analysis = match state.service.analyze_corpus(&content, &native_name).await {
        Ok(analysis) => analysis,
        Err(e) => {
            tracing::error!("Analysis failed: {}", e);
            return send_status(app_to_ui_tx, format!("Analysis failed: {}", e), false).await;
        }
    };

    let item = {
        let mut library = state.library.lock().await;
        if let Err(e) = library.save_corpus_item(content, analysis) {
            // the item stays in memory for this session
            tracing::error!("Failed to store corpus item: {}", e);
            send_status(app_to_ui_tx, format!("Could not save: {}", e), false).await?;
        }
        library.corpus().first().cloned()
    };

    let Some(item) = item else {
        return Ok(());
    };

    app_to_ui_tx.send(AppEvent::ShowCorpusItem(item)).await?;
    Ok(())
}
