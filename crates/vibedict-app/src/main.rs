use std::io;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing_subscriber::EnvFilter;
use vibedict_config::Config;
use vibedict_gemini::GeminiClient;
use vibedict_types::{AppEvent, UiEvent};

use self::controller::{AppController, run_once};
use self::state::AppState;
use self::storage::JsonFileStore;
use self::ui::Presenter;

pub mod controller;
pub mod events;
pub mod input;
pub mod state;
pub mod storage;
pub mod ui;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(name = "vibedict")]
#[command(about = "Dictionary lookups and annotated reading backed by Gemini", long_about = None)]
#[command(version)]
struct Cli {
    /// Interactive session when omitted
    #[command(subcommand)]
    command: Option<Commands>,

    /// JSON config file
    #[arg(short, long, default_value = "vibedict.json")]
    config: PathBuf,

    /// Log level for the vibedict crates (RUST_LOG overrides)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long)]
    log_json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Look up a word
    Define {
        word: String,

        /// Keep the definition in the notebook
        #[arg(long)]
        save: bool,
    },
    /// Analyze a passage and add it to the corpus
    Analyze {
        text: Option<String>,

        /// Read the passage from a file
        #[arg(short, long, conflicts_with = "text")]
        file: Option<PathBuf>,
    },
    /// Show a corpus item with its highlights
    Show {
        /// Corpus item id or a unique prefix of it
        id: String,

        /// Open the detail of highlighted span N
        #[arg(long)]
        select: Option<usize>,
    },
    /// List saved words
    Notebook {
        #[arg(long)]
        remove: Option<String>,
    },
    /// List analyzed passages
    Corpus {
        #[arg(long)]
        remove: Option<String>,
    },
    /// Short story using the saved words
    Story,
    /// Ask the tutor about a word
    Chat {
        word: String,

        #[arg(required = true, num_args = 1..)]
        message: Vec<String>,
    },
    /// Synthesize speech in the target language
    Say {
        text: String,

        /// Write the raw 16-bit PCM audio to this file
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Choose native and target language by code or name
    Setup { native: String, target: String },
    /// Interactive session
    Repl,
}

impl Commands {
    fn into_events(self) -> anyhow::Result<Vec<AppEvent>> {
        let events = match self {
            Commands::Define { word, save } => vec![AppEvent::LookupWord { query: word, save }],
            Commands::Analyze { text, file } => {
                let text = match (text, file) {
                    (_, Some(path)) => std::fs::read_to_string(&path)
                        .with_context(|| format!("Failed to read {}", path.display()))?,
                    (Some(text), None) => text,
                    (None, None) => anyhow::bail!("Pass the text or --file"),
                };
                vec![AppEvent::AnalyzeText(text)]
            }
            Commands::Show { id, select } => {
                let mut events = vec![AppEvent::OpenCorpusItem(id)];
                if let Some(n) = select {
                    let n = n.checked_sub(1).context("Spans are numbered from 1")?;
                    events.push(AppEvent::UiEvent(UiEvent::SelectSpan(n)));
                }
                events
            }
            Commands::Notebook { remove: Some(id) } => {
                vec![AppEvent::RemoveWord(id), AppEvent::ListNotebook]
            }
            Commands::Notebook { remove: None } => vec![AppEvent::ListNotebook],
            Commands::Corpus { remove: Some(id) } => {
                vec![AppEvent::RemoveCorpusItem(id), AppEvent::ListCorpus]
            }
            Commands::Corpus { remove: None } => vec![AppEvent::ListCorpus],
            Commands::Story => vec![AppEvent::GenerateStory],
            Commands::Chat { word, message } => vec![AppEvent::Chat {
                word,
                message: message.join(" "),
            }],
            Commands::Say { text, out } => vec![AppEvent::Speak { text, out }],
            Commands::Setup { native, target } => vec![AppEvent::Setup { native, target }],
            Commands::Repl => Vec::new(),
        };

        Ok(events)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json);

    let config = Config::load(&cli.config)
        .with_context(|| format!("Failed to load config from {}", cli.config.display()))?;
    let capacity = config.channel_capacity;

    let store = JsonFileStore::from_config(&config.storage);
    tracing::info!("State file: {}", store.path().display());

    let service = GeminiClient::new(config.gemini.clone()).context("Failed to build HTTP client")?;
    let state = Arc::new(AppState::new(config, Box::new(store), Arc::new(service)));

    let command = cli.command.unwrap_or(Commands::Repl);
    if !matches!(command, Commands::Setup { .. })
        && !state.library.lock().await.is_setup_complete()
    {
        tracing::warn!("Languages not set up yet, using defaults (see `vibedict setup`)");
    }

    match command {
        Commands::Repl => run_repl(state, capacity).await,
        command => {
            let events = command.into_events()?;
            let ui_config = state.config.read().await.ui.clone();
            let mut presenter = Presenter::new(io::stdout(), ui_config);
            run_once(state, &mut presenter, events).await
        }
    }
}

fn init_tracing(level: &str, json: bool) {
    let level = level.to_lowercase();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "vibedict={level},vibedict_core={level},vibedict_gemini={level},vibedict_config={level}"
        ))
    });

    // Write logs to stderr, stdout carries the rendered output
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run_repl(state: Arc<AppState>, capacity: usize) -> anyhow::Result<()> {
    let controller = AppController::new(state, capacity);
    let mut tasks = controller.spawn_tasks();

    tokio::select! {
        _ = signal::ctrl_c() => {
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => log_task_exit(result),
    }

    controller.shutdown();
    while let Some(result) = tasks.join_next().await {
        log_task_exit(result);
    }

    Ok(())
}

fn log_task_exit(result: Result<anyhow::Result<()>, tokio::task::JoinError>) {
    match result {
        Ok(Ok(())) => tracing::debug!("Task finished"),
        Ok(Err(e)) => tracing::error!("Task failed: {e:#}"),
        Err(e) => tracing::error!("Task panicked: {e}"),
    }
}
