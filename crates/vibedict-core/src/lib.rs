pub mod annotation;
pub mod error;
pub mod flashcards;
pub mod highlight;
pub mod popup;
pub mod preprocess;
pub mod render;
pub mod ruby;
pub mod state;

pub use annotation::TextAnnotationIndex;
pub use error::CoreError;
pub use flashcards::{CardSide, Flashcards};
pub use highlight::{HighlightMatcher, Span};
pub use popup::{KnowledgePayload, PopupState};
pub use render::{CorpusView, RenderedSpan};
pub use ruby::RubyToken;
