use std::sync::Arc;

use kanal::AsyncSender;
use vibedict_core::preprocess::{DefaultPreprocessor, Preprocessor};
use vibedict_types::AppEvent;

use super::send_status;
use crate::state::AppState;

pub async fn handle_lookup(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    query: &str,
    save: bool,
) -> anyhow::Result<()> {
    let query = DefaultPreprocessor.process(query);
    if query.is_empty() {
        return send_status(app_to_ui_tx, "Nothing to look up", false).await;
    }

    let (native, target) = {
        let library = state.library.lock().await;
        (library.native_lang().clone(), library.target_lang().clone())
    };

    send_status(app_to_ui_tx, format!("Looking up '{}'...", query), true).await?;

    // the image never fails, so it can run alongside the definition
    let (definition, image_url) = tokio::join!(
        state.service.define_word(&query, &native, &target),
        state.service.concept_image(&query, &target.name),
    );

    let mut definition = match definition {
        Ok(definition) => definition,
        Err(e) => {
            tracing::error!("Lookup of '{}' failed: {}", query, e);
            return send_status(app_to_ui_tx, format!("Lookup failed: {}", e), false).await;
        }
    };
    definition.image_url = Some(image_url);

    if save {
        let mut library = state.library.lock().await;
        if let Err(e) = library.save_word(definition.clone()) {
            tracing::error!("Failed to save '{}': {}", definition.word, e);
            send_status(app_to_ui_tx, format!("Could not save: {}", e), false).await?;
        }
    }

    app_to_ui_tx.send(AppEvent::ShowDefinition(definition)).await?;
    Ok(())
}
