use std::collections::BTreeSet;

use serde::Serialize;

use crate::content::ContentLibrary;
use crate::glossary::Glossary;
use crate::models::{GlossaryDefinition, ViewState};

/// Message shown when an explanation is requested for a blank term. Handled
/// before any network attempt.
pub const BLANK_TERM_MESSAGE: &str = "Veuillez entrer un terme médical à expliquer.";

/// Circular cursor over the flashcard deck. The flipped flag is cleared
/// whenever the index changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FlashcardCursor {
    pub index: usize,
    pub flipped: bool,
}

impl FlashcardCursor {
    pub fn flip(&mut self) {
        self.flipped = !self.flipped;
    }

    pub fn clear_flip(&mut self) {
        self.flipped = false;
    }

    pub fn advance(&mut self, deck_size: usize) {
        if deck_size > 0 {
            self.index = (self.index + 1) % deck_size;
            self.flipped = false;
        }
    }

    pub fn retreat(&mut self, deck_size: usize) {
        if deck_size > 0 {
            self.index = (self.index + deck_size - 1) % deck_size;
            self.flipped = false;
        }
    }
}

/// Quiz progression: `InProgress(index, selected, score)` until the last
/// question is advanced past, then terminal with the final score until
/// `reset`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct QuizSession {
    pub current: usize,
    pub selected: Option<usize>,
    pub score: u32,
    pub completed: bool,
}

impl QuizSession {
    /// First answer wins: once an option is selected for the current
    /// question, later selections are ignored. Returns whether the
    /// selection was applied.
    pub fn select_option(&mut self, option: usize, correct_index: usize) -> bool {
        if self.completed || self.selected.is_some() {
            return false;
        }
        self.selected = Some(option);
        if option == correct_index {
            self.score += 1;
        }
        true
    }

    pub fn advance(&mut self, total: usize) {
        if self.completed {
            return;
        }
        if self.current + 1 >= total {
            self.completed = true;
        } else {
            self.current += 1;
            self.selected = None;
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Result band for the score message. Derived, never stored.
    pub fn band(&self, total: usize) -> ScoreBand {
        let score = self.score as usize;
        if score == total {
            ScoreBand::Excellent
        } else if score * 2 >= total {
            ScoreBand::Good
        } else {
            ScoreBand::Review
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Excellent,
    Good,
    Review,
}

impl ScoreBand {
    pub fn message(&self) -> &'static str {
        match self {
            ScoreBand::Excellent => "🏆 Parfait ! Maîtrise excellente du sujet.",
            ScoreBand::Good => "👍 Bon résultat ! Quelques points à revoir.",
            ScoreBand::Review => "📚 À approfondir - Consultez la fiche mémo.",
        }
    }
}

/// Which memo sections are currently expanded.
#[derive(Debug, Clone, Default)]
pub struct MemoState {
    expanded: BTreeSet<usize>,
}

impl MemoState {
    /// Toggle a section; returns whether it is now expanded.
    pub fn toggle(&mut self, index: usize) -> bool {
        if self.expanded.remove(&index) {
            false
        } else {
            self.expanded.insert(index);
            true
        }
    }

    pub fn is_expanded(&self, index: usize) -> bool {
        self.expanded.contains(&index)
    }

    pub fn expanded_indices(&self) -> Vec<usize> {
        self.expanded.iter().copied().collect()
    }
}

/// UI state of the glossary view: the current explanation text and the two
/// re-entrancy guards (one per lookup kind).
#[derive(Debug, Clone, Default)]
pub struct GlossaryPanel {
    pub explanation: Option<String>,
    pub explain_busy: bool,
    pub preload_busy: bool,
}

/// The whole interactive session. One instance per process, owned by the
/// study service behind a mutex; never reachable through ambient statics.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub started: bool,
    pub active_view: ViewState,
    pub memo: MemoState,
    pub flashcards: FlashcardCursor,
    pub quiz: QuizSession,
    pub glossary: Glossary,
    pub panel: GlossaryPanel,
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Immutable, serializable description of the session, sufficient for a
    /// presentation layer to render every view.
    pub fn snapshot(&self, content: &ContentLibrary) -> Snapshot {
        let quiz_total = content.quiz.len();
        Snapshot {
            started: self.started,
            active_view: self.active_view,
            memo: MemoSnapshot {
                expanded: self.memo.expanded_indices(),
            },
            flashcards: FlashcardSnapshot {
                index: self.flashcards.index,
                flipped: self.flashcards.flipped,
                total: content.flashcards.len(),
            },
            quiz: QuizSnapshot {
                current: self.quiz.current,
                selected: self.quiz.selected,
                score: self.quiz.score,
                total: quiz_total,
                completed: self.quiz.completed,
                result: self.quiz.completed.then(|| {
                    let band = self.quiz.band(quiz_total);
                    QuizResult {
                        band,
                        message: band.message().to_string(),
                    }
                }),
            },
            glossary: GlossarySnapshot {
                entries: self.glossary.sorted_entries(),
                explanation: self.panel.explanation.clone(),
                explain_busy: self.panel.explain_busy,
                preload_busy: self.panel.preload_busy,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub started: bool,
    pub active_view: ViewState,
    pub memo: MemoSnapshot,
    pub flashcards: FlashcardSnapshot,
    pub quiz: QuizSnapshot,
    pub glossary: GlossarySnapshot,
}

#[derive(Debug, Clone, Serialize)]
pub struct MemoSnapshot {
    pub expanded: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FlashcardSnapshot {
    pub index: usize,
    pub flipped: bool,
    pub total: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizSnapshot {
    pub current: usize,
    pub selected: Option<usize>,
    pub score: u32,
    pub total: usize,
    pub completed: bool,
    pub result: Option<QuizResult>,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuizResult {
    pub band: ScoreBand,
    pub message: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GlossarySnapshot {
    pub entries: Vec<GlossaryDefinition>,
    pub explanation: Option<String>,
    pub explain_busy: bool,
    pub preload_busy: bool,
}
