use vibedict_types::SavedWord;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardSide {
    #[default]
    Front,
    Back,
}

/// Review deck over notebook words; navigation wraps around
#[derive(Debug, Clone, Default)]
pub struct Flashcards {
    words: Vec<SavedWord>,
    position: usize,
    side: CardSide,
}

impl Flashcards {
    pub fn new(words: Vec<SavedWord>) -> Self {
        Self {
            words,
            position: 0,
            side: CardSide::Front,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn side(&self) -> CardSide {
        self.side
    }

    pub fn current(&self) -> Option<&SavedWord> {
        self.words.get(self.position)
    }

    pub fn flip(&mut self) {
        self.side = match self.side {
            CardSide::Front => CardSide::Back,
            CardSide::Back => CardSide::Front,
        };
    }

    pub fn next(&mut self) {
        if !self.words.is_empty() {
            self.position = (self.position + 1) % self.words.len();
            self.side = CardSide::Front;
        }
    }

    pub fn prev(&mut self) {
        if !self.words.is_empty() {
            self.position = (self.position + self.words.len() - 1) % self.words.len();
            self.side = CardSide::Front;
        }
    }
}
