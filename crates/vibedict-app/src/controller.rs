use std::collections::VecDeque;
use std::io::Write;
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use vibedict_types::AppEvent;

use crate::events::{event_loop, handle_events};
use crate::input::watcher_io;
use crate::state::AppState;
use crate::ui::{Flow, Presenter, ui_loop};

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
}

impl ChannelSet {
    pub fn new(capacity: usize) -> Self {
        Self {
            app_to_ui: kanal::bounded_async(capacity),
            ui_to_app: kanal::bounded_async(capacity),
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>, capacity: usize) -> Self {
        Self {
            channels: ChannelSet::new(capacity),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.ui_to_app.1.clone(),
            self.channels.app_to_ui.0.clone(),
            self.cancel_token.child_token(),
        ));

        // UI loop, owns the cancel token so closing the UI stops everything
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            self.state.config.clone(),
            self.cancel_token.clone(),
        ));

        // Stdin watcher
        tasks.spawn(watcher_io(
            self.cancel_token.child_token(),
            self.channels.ui_to_app.0.clone(),
            self.channels.app_to_ui.0.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Run `events` in order without spawning the interactive tasks.
///
/// Backend events are handled inline and whatever they display is presented
/// before the next event starts.
pub async fn run_once<W: Write>(
    state: Arc<AppState>,
    presenter: &mut Presenter<W>,
    events: Vec<AppEvent>,
) -> anyhow::Result<()> {
    let (app_to_ui_tx, app_to_ui_rx) = kanal::unbounded_async();
    let mut pending: VecDeque<AppEvent> = events.into();

    while let Some(event) = pending.pop_front() {
        if let AppEvent::UiEvent(_) = event {
            present(presenter, event, &mut pending)?;
            continue;
        }

        handle_events(state.clone(), &app_to_ui_tx, event).await?;
        while let Ok(Some(display)) = app_to_ui_rx.try_recv() {
            present(presenter, display, &mut pending)?;
        }
    }

    Ok(())
}

fn present<W: Write>(
    presenter: &mut Presenter<W>,
    event: AppEvent,
    pending: &mut VecDeque<AppEvent>,
) -> std::io::Result<()> {
    match presenter.handle(event)? {
        Flow::Request(request) => pending.push_back(request),
        Flow::Exit => pending.clear(),
        Flow::Continue => {}
    }
    Ok(())
}
