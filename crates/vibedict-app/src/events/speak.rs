use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use kanal::AsyncSender;
use vibedict_core::ruby;
use vibedict_types::AppEvent;

use super::send_status;
use crate::state::AppState;

/// Bytes per sample of the 16-bit little-endian PCM the service returns
const SAMPLE_BYTES: usize = 2;

pub async fn handle_speak(
    state: Arc<AppState>,
    app_to_ui_tx: &AsyncSender<AppEvent>,
    text: &str,
    out: Option<&Path>,
) -> anyhow::Result<()> {
    let lang = state.library.lock().await.target_lang().code.clone();
    // readings in brackets are not meant to be read aloud
    let text = ruby::strip(text);

    send_status(app_to_ui_tx, "Synthesizing speech...", true).await?;

    let audio = match state.service.speak(&text, &lang).await {
        Ok(Some(audio)) => audio,
        Ok(None) => return send_status(app_to_ui_tx, "Nothing to speak", false).await,
        Err(e) => {
            tracing::error!("Speech synthesis failed: {}", e);
            return send_status(app_to_ui_tx, format!("Speech failed: {}", e), false).await;
        }
    };

    let pcm = match STANDARD.decode(audio.data.trim()) {
        Ok(pcm) => pcm,
        Err(e) => {
            tracing::error!("Speech audio is not valid base64: {}", e);
            return send_status(app_to_ui_tx, format!("Speech failed: bad audio data: {}", e), false)
                .await;
        }
    };

    let frames = pcm.len() / (SAMPLE_BYTES * usize::from(audio.channels.max(1)));
    let mut status = format!(
        "Speech ready: {} Hz, {} channel(s), {} frames of 16-bit PCM",
        audio.sample_rate, audio.channels, frames
    );

    if let Some(path) = out {
        let written = tokio::fs::write(path, &pcm)
            .await
            .with_context(|| format!("Failed to write speech to {}", path.display()));

        match written {
            Ok(()) => status.push_str(&format!(", written to {}", path.display())),
            Err(e) => {
                tracing::error!("{:#}", e);
                status = format!("{:#}", e);
            }
        }
    }

    send_status(app_to_ui_tx, status, false).await
}
