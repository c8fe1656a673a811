use unicode_normalization::UnicodeNormalization;

/// Number of characters kept in a corpus item title
pub const TITLE_CHARS: usize = 30;

pub trait Preprocessor {
    /// Cleans a lookup query typed or pasted by the user
    fn process(&self, text: &str) -> String {
        let text = text.trim();

        if text.is_empty() {
            return String::new();
        }

        // full-width latin and half-width kana fold to one form
        let text: String = text.nfkc().collect();

        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }
}

pub struct DefaultPreprocessor;
impl Preprocessor for DefaultPreprocessor {}

/// First `TITLE_CHARS` characters of `content`, with `...` when cut
pub fn title_for(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(TITLE_CHARS).collect();

    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
