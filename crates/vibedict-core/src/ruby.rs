use std::sync::OnceLock;

use regex::Regex;
use serde::Serialize;

/// Inline reading annotation markup: `漢字[かんじ]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum RubyToken<'a> {
    Bare { text: &'a str },
    Annotated { base: &'a str, reading: &'a str },
}

impl RubyToken<'_> {
    /// Write the token back in its source form
    pub fn write_markup(&self, out: &mut String) {
        match self {
            RubyToken::Bare { text } => out.push_str(text),
            RubyToken::Annotated { base, reading } => {
                out.push_str(base);
                out.push('[');
                out.push_str(reading);
                out.push(']');
            }
        }
    }
}

fn bracket_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // shortest bracket group on a single line
    PATTERN.get_or_init(|| Regex::new(r"\[.*?\]").unwrap())
}

/// Split `text` into bare and annotated runs.
///
/// A bracket group annotates the whole plain run right before it. A group
/// with nothing before it (start of text, or right after another group) or
/// with nothing inside is kept verbatim as bare text. Adjacent bare text is
/// merged, so the result never holds two `Bare` tokens in a row.
pub fn segment(text: &str) -> Vec<RubyToken<'_>> {
    let mut tokens = Vec::new();
    let mut bare_from: Option<usize> = None;
    let mut cursor = 0;

    for m in bracket_pattern().find_iter(text) {
        let base = &text[cursor..m.start()];
        let reading = &text[m.start() + 1..m.end() - 1];

        if base.is_empty() || reading.is_empty() {
            bare_from.get_or_insert(cursor);
        } else {
            flush_bare(&mut tokens, text, bare_from.take(), cursor);
            tokens.push(RubyToken::Annotated { base, reading });
        }

        cursor = m.end();
    }

    if cursor < text.len() {
        bare_from.get_or_insert(cursor);
    }
    flush_bare(&mut tokens, text, bare_from, text.len());

    tokens
}

/// Inverse of [`segment`]
pub fn to_markup(tokens: &[RubyToken<'_>]) -> String {
    let mut out = String::new();
    for token in tokens {
        token.write_markup(&mut out);
    }
    out
}

/// Text with all valid annotations removed, e.g. for speech or search
pub fn strip(text: &str) -> String {
    segment(text)
        .iter()
        .map(|token| match token {
            RubyToken::Bare { text } => *text,
            RubyToken::Annotated { base, .. } => *base,
        })
        .collect()
}

fn flush_bare<'a>(tokens: &mut Vec<RubyToken<'a>>, text: &'a str, from: Option<usize>, to: usize) {
    if let Some(from) = from
        && from < to
    {
        tokens.push(RubyToken::Bare {
            text: &text[from..to],
        });
    }
}
