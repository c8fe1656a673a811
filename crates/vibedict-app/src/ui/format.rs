//! Plain-text and styled terminal rendering of display events

use std::fmt::Write;

use crossterm::style::{ContentStyle, Stylize};
use vibedict_config::ui::UiConfig;
use vibedict_core::render::RenderedSpan;
use vibedict_core::ruby::{self, RubyToken};
use vibedict_core::{CardSide, CorpusView, Flashcards, KnowledgePayload};
use vibedict_types::{CorpusItem, SavedWord, TermKind, WordDefinition};

fn bold() -> ContentStyle {
    ContentStyle::new().bold()
}

fn dim() -> ContentStyle {
    ContentStyle::new().dim()
}

fn vocabulary() -> ContentStyle {
    ContentStyle::new().yellow().bold().underlined()
}

fn grammar() -> ContentStyle {
    ContentStyle::new().cyan().underlined()
}

struct Painter {
    color: bool,
}

impl Painter {
    fn paint(&self, style: ContentStyle, text: &str) -> String {
        if self.color {
            style.apply(text).to_string()
        } else {
            text.to_string()
        }
    }
}

/// Ruby tokens as `base(reading)`, or the raw markup when ruby is hidden
pub fn ruby_text(tokens: &[RubyToken<'_>], show_ruby: bool) -> String {
    if !show_ruby {
        return ruby::to_markup(tokens);
    }

    let mut out = String::new();
    for token in tokens {
        match token {
            RubyToken::Bare { text } => out.push_str(text),
            RubyToken::Annotated { base, reading } => {
                let _ = write!(out, "{base}({reading})");
            }
        }
    }
    out
}

fn term_label(text: &str, show_ruby: bool) -> String {
    ruby_text(&ruby::segment(text), show_ruby)
}

fn term_style(kind: TermKind) -> ContentStyle {
    match kind {
        TermKind::Vocabulary => vocabulary(),
        TermKind::Grammar => grammar(),
    }
}

/// One sentence; highlighted spans carry their click number as `[n]`.
/// `next_target` is the number of the first click target in this sentence.
pub fn sentence_line(spans: &[RenderedSpan<'_>], next_target: &mut usize, config: &UiConfig) -> String {
    let painter = Painter {
        color: config.color,
    };
    let mut line = String::new();

    for span in spans {
        let text = ruby_text(&span.ruby, config.show_ruby);
        match span.term {
            Some(term) => {
                line.push_str(&painter.paint(term_style(term.kind), &text));
                let _ = write!(line, "{}", painter.paint(dim(), &format!("[{}]", next_target)));
                *next_target += 1;
            }
            None => line.push_str(&text),
        }
    }

    line
}

pub fn corpus_view(view: &CorpusView, config: &UiConfig) -> String {
    let painter = Painter {
        color: config.color,
    };
    let item = view.item();
    let analysis = &item.analysis;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{} {}",
        painter.paint(bold(), &item.title),
        painter.paint(dim(), &format!("({}, {})", analysis.detected_lang, short_id(&item.id)))
    );
    let _ = writeln!(out, "{}\n", analysis.summary);

    let mut next_target = 1;
    for sentence in view.render() {
        let _ = writeln!(out, "  {}", sentence_line(&sentence.spans, &mut next_target, config));
        let _ = writeln!(out, "  {}", painter.paint(dim(), sentence.translated));
    }

    if !analysis.vocabulary.is_empty() {
        let _ = writeln!(out, "\n{}", painter.paint(bold(), "Vocabulary"));
        for (i, entry) in analysis.vocabulary.iter().enumerate() {
            let label = term_label(&entry.term, config.show_ruby);
            let _ = writeln!(
                out,
                "  v{} {} - {}",
                i + 1,
                painter.paint(vocabulary(), &label),
                entry.explanation
            );
        }
    }

    if !analysis.grammar.is_empty() {
        let _ = writeln!(out, "\n{}", painter.paint(bold(), "Grammar"));
        for (i, point) in analysis.grammar.iter().enumerate() {
            let label = term_label(&point.point, config.show_ruby);
            let _ = writeln!(
                out,
                "  g{} {} - {}",
                i + 1,
                painter.paint(grammar(), &label),
                point.explanation
            );
        }
    }

    out
}

pub fn popup(payload: &KnowledgePayload, config: &UiConfig) -> String {
    let painter = Painter {
        color: config.color,
    };
    let mut out = String::new();

    let title = term_label(&payload.title, config.show_ruby);
    let _ = writeln!(
        out,
        "{} {}",
        painter.paint(term_style(payload.kind), &title),
        painter.paint(dim(), payload.kind.label())
    );
    if let Some(pronunciation) = &payload.pronunciation {
        let _ = writeln!(out, "  {}", pronunciation);
    }
    let _ = writeln!(out, "  {}", payload.description);
    for example in payload.examples.iter().take(config.max_examples) {
        let _ = writeln!(out, "  > {}", term_label(example, config.show_ruby));
    }

    out
}

pub fn definition(def: &WordDefinition, config: &UiConfig) -> String {
    let painter = Painter {
        color: config.color,
    };
    let mut out = String::new();

    let _ = write!(out, "{}", painter.paint(bold(), &def.word));
    if let Some(pronunciation) = &def.pronunciation {
        let _ = write!(out, "  {}", painter.paint(dim(), pronunciation));
    }
    let _ = writeln!(out);
    let _ = writeln!(out, "  {}", def.explanation);

    for example in def.examples.iter().take(config.max_examples) {
        let _ = writeln!(out, "  > {}", example.target);
        let _ = writeln!(out, "    {}", painter.paint(dim(), &example.native));
    }

    if !def.usage_notes.is_empty() {
        let _ = writeln!(out, "  {}", def.usage_notes);
    }

    // data URLs are far too long for a terminal
    if let Some(url) = &def.image_url
        && !url.starts_with("data:")
    {
        let _ = writeln!(out, "  {}", painter.paint(dim(), url));
    }

    out
}

pub fn notebook(words: &[SavedWord], config: &UiConfig) -> String {
    if words.is_empty() {
        return "Notebook is empty\n".to_string();
    }

    let painter = Painter {
        color: config.color,
    };
    let mut out = String::new();
    for word in words {
        let _ = writeln!(
            out,
            "{} {} - {}",
            painter.paint(dim(), short_id(&word.id)),
            painter.paint(bold(), &word.definition.word),
            word.definition.explanation
        );
    }
    out
}

pub fn corpus_list(items: &[CorpusItem], config: &UiConfig) -> String {
    if items.is_empty() {
        return "Corpus is empty\n".to_string();
    }

    let painter = Painter {
        color: config.color,
    };
    let mut out = String::new();
    for item in items {
        let _ = writeln!(
            out,
            "{} {} {}",
            painter.paint(dim(), short_id(&item.id)),
            item.title,
            painter.paint(dim(), &format!("({} terms)", item.analysis.vocabulary.len() + item.analysis.grammar.len()))
        );
    }
    out
}

pub fn card(deck: &Flashcards, config: &UiConfig) -> String {
    let Some(word) = deck.current() else {
        return "No cards\n".to_string();
    };

    let painter = Painter {
        color: config.color,
    };
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{}",
        painter.paint(dim(), &format!("card {}/{}", deck.position() + 1, deck.len()))
    );

    match deck.side() {
        CardSide::Front => {
            let _ = writeln!(out, "  {}", painter.paint(bold(), &word.definition.word));
        }
        CardSide::Back => out.push_str(&definition(&word.definition, config)),
    }

    out
}

/// Leading part of an id, enough to type back as a prefix
pub fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((end, _)) => &id[..end],
        None => id,
    }
}
