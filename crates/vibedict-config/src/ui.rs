use serde::{Deserialize, Serialize};

fn default_show_ruby() -> bool {
    true
}

fn default_color() -> bool {
    true
}

fn default_max_examples() -> usize {
    3
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct UiConfig {
    /// Render `漢字[かんじ]` as `漢字(かんじ)` instead of the raw markup
    #[serde(default = "default_show_ruby")]
    pub show_ruby: bool,
    /// ANSI styling for highlighted spans
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_max_examples")]
    pub max_examples: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            show_ruby: default_show_ruby(),
            color: default_color(),
            max_examples: default_max_examples(),
        }
    }
}
