use serde::Serialize;
use vibedict_types::{AnnotatedTerm, TermKind};

/// Detail shown for the selected term
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KnowledgePayload {
    pub title: String,
    pub pronunciation: Option<String>,
    pub description: String,
    pub examples: Vec<String>,
    pub kind: TermKind,
}

impl From<&AnnotatedTerm> for KnowledgePayload {
    fn from(term: &AnnotatedTerm) -> Self {
        // grammar points never carry a pronunciation line
        let pronunciation = match term.kind {
            TermKind::Vocabulary => term.pronunciation.clone(),
            TermKind::Grammar => None,
        };

        Self {
            title: term.term.clone(),
            pronunciation,
            description: term.explanation.clone(),
            examples: term.examples.clone(),
            kind: term.kind,
        }
    }
}

/// Which single term is open for detail display
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub enum PopupState {
    #[default]
    Closed,
    Open(KnowledgePayload),
}

impl PopupState {
    /// Open with `payload`, replacing whatever was shown
    pub fn select(self, payload: KnowledgePayload) -> Self {
        PopupState::Open(payload)
    }

    pub fn dismiss(self) -> Self {
        PopupState::Closed
    }

    pub fn is_open(&self) -> bool {
        matches!(self, PopupState::Open(_))
    }

    pub fn payload(&self) -> Option<&KnowledgePayload> {
        match self {
            PopupState::Closed => None,
            PopupState::Open(payload) => Some(payload),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn term(text: &str, kind: TermKind) -> AnnotatedTerm {
        AnnotatedTerm {
            term: text.into(),
            kind,
            pronunciation: Some("reading".into()),
            explanation: format!("{text} explained"),
            examples: vec![format!("{text} example")],
        }
    }

    #[test]
    fn select_and_dismiss() {
        let state = PopupState::default();
        assert!(!state.is_open());

        let state = state.select(KnowledgePayload::from(&term("猫", TermKind::Vocabulary)));
        assert_eq!(state.payload().map(|p| p.title.as_str()), Some("猫"));
        assert_eq!(
            state.payload().and_then(|p| p.pronunciation.as_deref()),
            Some("reading")
        );

        assert_eq!(state.dismiss(), PopupState::Closed);
    }

    #[test]
    fn reselect_replaces_payload_directly() {
        let a = KnowledgePayload::from(&term("a", TermKind::Vocabulary));
        let b = KnowledgePayload::from(&term("b", TermKind::Grammar));

        let state = PopupState::Closed.select(a).select(b.clone());
        assert_eq!(state, PopupState::Open(b));
    }

    #[test]
    fn grammar_payload_has_no_pronunciation() {
        let payload = KnowledgePayload::from(&term("〜ている", TermKind::Grammar));
        assert_eq!(payload.pronunciation, None);
        assert_eq!(payload.kind, TermKind::Grammar);
    }

    #[test]
    fn dismiss_when_closed_stays_closed() {
        assert_eq!(PopupState::Closed.dismiss(), PopupState::Closed);
    }
}
