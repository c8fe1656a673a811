use std::io::{self, Write};
use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::sync::RwLock;
use tokio_util::sync::CancellationToken;
use vibedict_config::Config;
use vibedict_config::ui::UiConfig;
use vibedict_core::{CorpusView, Flashcards, KnowledgePayload, PopupState};
use vibedict_types::{AnnotatedTerm, AppEvent, UiEvent, WordDefinition};

pub mod format;

pub const HELP: &str = "\
commands:
  <text>                 look up a word, or analyze a longer passage
  define <word>          look up a word
  save <word>            look up a word and keep it in the notebook
  keep                   keep the last shown definition
  analyze <text>         analyze a passage into the corpus
  <n> | v<n> | g<n>      open highlighted span n, vocabulary n, grammar n
  x                      close the detail popup
  notebook | rm <id>     list saved words, remove one
  corpus | open <id> | drop <id>
  review | flip | next | prev
  story                  short story from saved words
  chat <word> <message>  ask the tutor about a word
  say <text>             synthesize speech
  setup <native> <target>
  help | quit";

/// What the UI loop does after an event
#[derive(Debug, PartialEq)]
pub enum Flow {
    Continue,
    /// Forward a request to the backend
    Request(AppEvent),
    Exit,
}

/// Terminal presentation state: the open corpus item, the detail popup and
/// the flashcard deck
pub struct Presenter<W: Write> {
    out: W,
    config: UiConfig,
    view: Option<CorpusView>,
    popup: PopupState,
    deck: Flashcards,
    last_definition: Option<WordDefinition>,
}

impl<W: Write> Presenter<W> {
    pub fn new(out: W, config: UiConfig) -> Self {
        Self {
            out,
            config,
            view: None,
            popup: PopupState::Closed,
            deck: Flashcards::default(),
            last_definition: None,
        }
    }

    pub fn popup(&self) -> &PopupState {
        &self.popup
    }

    pub fn output(&self) -> &W {
        &self.out
    }

    pub fn handle(&mut self, event: AppEvent) -> io::Result<Flow> {
        match event {
            AppEvent::UiEvent(event) => return self.handle_ui(event),
            AppEvent::ShowDefinition(definition) => {
                let text = format::definition(&definition, &self.config);
                self.last_definition = Some(definition);
                self.print(&text)?;
            }
            AppEvent::ShowCorpusItem(item) => {
                let view = CorpusView::new(item);
                let text = format::corpus_view(&view, &self.config);
                self.view = Some(view);
                self.popup = std::mem::take(&mut self.popup).dismiss();
                self.print(&text)?;
            }
            AppEvent::ShowNotebook(words) => {
                let text = format::notebook(&words, &self.config);
                self.print(&text)?;
            }
            AppEvent::ShowCorpus(items) => {
                let text = format::corpus_list(&items, &self.config);
                self.print(&text)?;
            }
            AppEvent::ShowFlashcards(words) => {
                self.deck = Flashcards::new(words);
                self.print_card()?;
            }
            AppEvent::ShowStory(story) => {
                self.print(&format!("{}\n", story.trim_end()))?;
            }
            AppEvent::ShowChatReply { word, reply } => {
                self.print(&format!("[{}] {}\n", word, reply.trim_end()))?;
            }
            AppEvent::StatusUpdate { status, busy } => {
                let marker = if busy { "..." } else { "--" };
                self.print(&format!("{} {}\n", marker, status))?;
            }
            AppEvent::BackendReady => {
                tracing::debug!("Backend ready");
                self.print("-- Ready, type help for commands\n")?;
            }
            _ => {}
        }

        Ok(Flow::Continue)
    }

    fn handle_ui(&mut self, event: UiEvent) -> io::Result<Flow> {
        match event {
            UiEvent::SelectSpan(n) => {
                let term = self
                    .view
                    .as_ref()
                    .and_then(|view| view.click_targets().get(n).map(|term| (*term).clone()));
                self.open(term, "span", n)?;
            }
            UiEvent::SelectVocabulary(n) => {
                let term = self.view.as_ref().and_then(|view| {
                    view.item()
                        .analysis
                        .vocabulary
                        .get(n)
                        .map(AnnotatedTerm::from)
                });
                self.open(term, "vocabulary entry", n)?;
            }
            UiEvent::SelectGrammar(n) => {
                let term = self
                    .view
                    .as_ref()
                    .and_then(|view| view.item().analysis.grammar.get(n).map(AnnotatedTerm::from));
                self.open(term, "grammar point", n)?;
            }
            UiEvent::Dismiss => {
                self.popup = std::mem::take(&mut self.popup).dismiss();
            }
            UiEvent::SaveDefinition => {
                return match self.last_definition.clone() {
                    Some(definition) => Ok(Flow::Request(AppEvent::SaveWord(definition))),
                    None => {
                        self.print("-- No definition to keep\n")?;
                        Ok(Flow::Continue)
                    }
                };
            }
            UiEvent::FlipCard => {
                self.deck.flip();
                self.print_card()?;
            }
            UiEvent::NextCard => {
                self.deck.next();
                self.print_card()?;
            }
            UiEvent::PrevCard => {
                self.deck.prev();
                self.print_card()?;
            }
            UiEvent::Help => {
                self.print(&format!("{}\n", HELP))?;
            }
            UiEvent::Close => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    fn open(&mut self, term: Option<AnnotatedTerm>, what: &str, n: usize) -> io::Result<()> {
        let Some(term) = term else {
            return self.print(&format!("-- No {} {}\n", what, n + 1));
        };

        let payload = KnowledgePayload::from(&term);
        let text = format::popup(&payload, &self.config);
        self.popup = std::mem::take(&mut self.popup).select(payload);
        self.print(&text)
    }

    fn print_card(&mut self) -> io::Result<()> {
        let text = format::card(&self.deck, &self.config);
        self.print(&text)
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        self.out.write_all(text.as_bytes())?;
        self.out.flush()
    }
}

/// Terminal UI task: renders backend events and UI-local commands
pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    config: Arc<RwLock<Config>>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let ui_config = config.read().await.ui.clone();
    let mut presenter = Presenter::new(io::stdout(), ui_config);

    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => event?,
        };

        match presenter.handle(event)? {
            Flow::Continue => {}
            Flow::Request(request) => ui_to_app_tx.send(request).await?,
            Flow::Exit => {
                tracing::info!("UI closed");
                cancel.cancel();
                break;
            }
        }
    }

    Ok(())
}
