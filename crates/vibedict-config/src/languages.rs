use vibedict_types::Language;

/// (code, name, flag) of every language offered at setup
const LANGUAGE_TABLE: &[(&str, &str, &str)] = &[
    ("en", "English", "🇺🇸"),
    ("ja", "Japanese", "🇯🇵"),
    ("zh", "Chinese", "🇨🇳"),
    ("ko", "Korean", "🇰🇷"),
    ("es", "Spanish", "🇪🇸"),
    ("fr", "French", "🇫🇷"),
    ("de", "German", "🇩🇪"),
    ("it", "Italian", "🇮🇹"),
    ("pt", "Portuguese", "🇧🇷"),
    ("ru", "Russian", "🇷🇺"),
];

pub fn languages() -> Vec<Language> {
    LANGUAGE_TABLE
        .iter()
        .map(|(code, name, flag)| Language::new(code, name, flag))
        .collect()
}

pub fn default_native() -> Language {
    let (code, name, flag) = LANGUAGE_TABLE[0];
    Language::new(code, name, flag)
}

pub fn default_target() -> Language {
    let (code, name, flag) = LANGUAGE_TABLE[1];
    Language::new(code, name, flag)
}

/// Look up by code or by (case-insensitive) name
pub fn find_language(query: &str) -> Option<Language> {
    let query = query.trim();
    LANGUAGE_TABLE
        .iter()
        .find(|(code, name, _)| code.eq_ignore_ascii_case(query) || name.eq_ignore_ascii_case(query))
        .map(|(code, name, flag)| Language::new(code, name, flag))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_by_code_and_name() {
        assert_eq!(find_language("ja").unwrap().name, "Japanese");
        assert_eq!(find_language("german").unwrap().code, "de");
        assert!(find_language("klingon").is_none());
    }

    #[test]
    fn defaults_differ() {
        assert_ne!(default_native(), default_target());
    }
}
