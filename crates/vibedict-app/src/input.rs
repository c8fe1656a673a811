use std::io::BufRead;

use kanal::AsyncSender;
use tokio_util::sync::CancellationToken;
use vibedict_types::{AppEvent, UiEvent};

/// Where a typed line is delivered
#[derive(Debug, PartialEq)]
pub enum Command {
    /// Backend request
    App(AppEvent),
    /// Handled by the UI alone
    Ui(UiEvent),
}

/// Watches stdin and turns lines into commands.
///
/// Reading happens on a dedicated thread since a blocking stdin read cannot
/// be cancelled; the thread is left behind when the process exits.
pub async fn watcher_io(
    cancel: CancellationToken,
    ui_to_app_tx: AsyncSender<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
) -> anyhow::Result<()> {
    let (line_tx, line_rx) = kanal::bounded::<String>(16);
    std::thread::Builder::new()
        .name("stdin".to_string())
        .spawn(move || read_lines(line_tx))?;
    let line_rx = line_rx.to_async();

    loop {
        let line = tokio::select! {
            _ = cancel.cancelled() => break,
            line = line_rx.recv() => line,
        };

        let Ok(line) = line else {
            tracing::info!("stdin closed");
            app_to_ui_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
            break;
        };

        match parse_line(&line) {
            Some(Command::App(event)) => ui_to_app_tx.send(event).await?,
            Some(Command::Ui(event)) => app_to_ui_tx.send(AppEvent::UiEvent(event)).await?,
            None => {}
        }
    }

    Ok(())
}

fn read_lines(line_tx: kanal::Sender<String>) {
    for line in std::io::stdin().lock().lines() {
        match line {
            Ok(line) => {
                if line_tx.send(line).is_err() {
                    break;
                }
            }
            Err(e) => {
                tracing::error!("Failed to read stdin: {}", e);
                break;
            }
        }
    }
}

pub fn parse_line(line: &str) -> Option<Command> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((head, rest)) => (head, rest.trim()),
        None => (line, ""),
    };

    let command = match (head, rest) {
        ("quit" | "exit" | ":q", "") => Command::Ui(UiEvent::Close),
        ("help" | "?", "") => Command::Ui(UiEvent::Help),
        ("x" | "close", "") => Command::Ui(UiEvent::Dismiss),
        ("keep", "") => Command::Ui(UiEvent::SaveDefinition),
        ("flip", "") => Command::Ui(UiEvent::FlipCard),
        ("next", "") => Command::Ui(UiEvent::NextCard),
        ("prev", "") => Command::Ui(UiEvent::PrevCard),
        ("notebook", "") => Command::App(AppEvent::ListNotebook),
        ("corpus", "") => Command::App(AppEvent::ListCorpus),
        ("review", "") => Command::App(AppEvent::ReviewCards),
        ("story", "") => Command::App(AppEvent::GenerateStory),
        ("define", query) if !query.is_empty() => Command::App(AppEvent::LookupWord {
            query: query.to_string(),
            save: false,
        }),
        ("save", query) if !query.is_empty() => Command::App(AppEvent::LookupWord {
            query: query.to_string(),
            save: true,
        }),
        ("analyze", text) if !text.is_empty() => Command::App(AppEvent::AnalyzeText(text.to_string())),
        ("rm", id) if !id.is_empty() => Command::App(AppEvent::RemoveWord(id.to_string())),
        ("open", id) if !id.is_empty() => Command::App(AppEvent::OpenCorpusItem(id.to_string())),
        ("drop", id) if !id.is_empty() => Command::App(AppEvent::RemoveCorpusItem(id.to_string())),
        ("say", text) if !text.is_empty() => Command::App(AppEvent::Speak {
            text: text.to_string(),
            out: None,
        }),
        ("chat", args) => {
            let (word, message) = args.split_once(char::is_whitespace)?;
            Command::App(AppEvent::Chat {
                word: word.to_string(),
                message: message.trim().to_string(),
            })
        }
        ("setup", args) => {
            let (native, target) = args.split_once(char::is_whitespace)?;
            Command::App(AppEvent::Setup {
                native: native.to_string(),
                target: target.trim().to_string(),
            })
        }
        _ => match selection(line) {
            Some(event) => Command::Ui(event),
            None => Command::App(AppEvent::TextInput(line.to_string())),
        },
    };

    Some(command)
}

/// `3`, `v3` and `g3` pick the third span, vocabulary entry or grammar point
fn selection(token: &str) -> Option<UiEvent> {
    let (make, digits): (fn(usize) -> UiEvent, &str) = match token.as_bytes().first()? {
        b'v' => (UiEvent::SelectVocabulary, &token[1..]),
        b'g' => (UiEvent::SelectGrammar, &token[1..]),
        _ => (UiEvent::SelectSpan, token),
    };

    let n: usize = digits.parse().ok()?;
    Some(make(n.checked_sub(1)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(line: &str) -> AppEvent {
        match parse_line(line) {
            Some(Command::App(event)) => event,
            other => panic!("expected app command for {line:?}, got {other:?}"),
        }
    }

    fn ui(line: &str) -> UiEvent {
        match parse_line(line) {
            Some(Command::Ui(event)) => event,
            other => panic!("expected ui command for {line:?}, got {other:?}"),
        }
    }

    #[test]
    fn selections_are_one_based() {
        assert_eq!(ui("1"), UiEvent::SelectSpan(0));
        assert_eq!(ui("v2"), UiEvent::SelectVocabulary(1));
        assert_eq!(ui("g10"), UiEvent::SelectGrammar(9));
        assert_eq!(app("0"), AppEvent::TextInput("0".into()));
        assert_eq!(app("vine"), AppEvent::TextInput("vine".into()));
    }

    #[test]
    fn commands_take_their_arguments() {
        assert_eq!(
            app("save  猫 "),
            AppEvent::LookupWord {
                query: "猫".into(),
                save: true
            }
        );
        assert_eq!(
            app("chat 猫 how is it   read?"),
            AppEvent::Chat {
                word: "猫".into(),
                message: "how is it   read?".into()
            }
        );
        assert_eq!(
            app("setup English Japanese"),
            AppEvent::Setup {
                native: "English".into(),
                target: "Japanese".into()
            }
        );
        assert_eq!(app("open ab12"), AppEvent::OpenCorpusItem("ab12".into()));
    }

    #[test]
    fn incomplete_commands() {
        assert_eq!(parse_line("   "), None);
        assert_eq!(parse_line("chat 猫"), None);
        assert_eq!(app("define"), AppEvent::TextInput("define".into()));
    }

    #[test]
    fn free_text_is_text_input() {
        assert_eq!(
            app("今日は雨です。"),
            AppEvent::TextInput("今日は雨です。".into())
        );
        assert_eq!(ui("quit"), UiEvent::Close);
    }
}
