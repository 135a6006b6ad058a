use std::sync::{Arc, Mutex};
use std::time::Duration;

use serde::Serialize;
use tokio::sync::watch;
use tracing::{debug, info};

use crate::content::ContentLibrary;
use crate::definition_service::{DefinitionService, ERROR_PREFIX};
use crate::highlighter::{highlight, Fragment};
use crate::models::{GlossaryDefinition, ViewState};
use crate::session::{SessionState, Snapshot, BLANK_TERM_MESSAGE};

/// Outcome of a bulk preload trigger. The preload runs at most once per
/// session lifetime: a non-empty glossary or an in-flight preload makes
/// further triggers no-ops.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PreloadOutcome {
    Loaded { added: usize },
    AlreadyLoaded,
    InFlight,
}

/// Outcome of an explicit single-term explain request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExplainOutcome {
    /// Blank input; no lookup attempted.
    BlankTerm,
    /// Served from the glossary without a remote call.
    Cached(String),
    /// Fetched from the remote service and cached.
    Defined(String),
    /// In-band failure message; shown but never cached.
    Failed(String),
    /// Rejected because another explain request is still pending.
    Busy,
}

/// A memo section rendered against the current glossary.
#[derive(Debug, Clone, Serialize)]
pub struct HighlightedSection {
    pub index: usize,
    pub title: String,
    pub expanded: bool,
    pub fragments: Vec<Fragment>,
}

/// Result of answering the current quiz question.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    /// False when the question already had a selection (first answer wins)
    /// or the quiz is completed.
    pub applied: bool,
    pub correct: bool,
    pub correct_index: usize,
    pub explanation: String,
}

/// Owns the session state and coordinates the interactive flows. All locks
/// are short and never held across an await; after every mutation a fresh
/// snapshot is published on the watch channel.
#[derive(Clone)]
pub struct StudyService {
    content: Arc<ContentLibrary>,
    definitions: DefinitionService,
    state: Arc<Mutex<SessionState>>,
    snapshots: Arc<watch::Sender<Snapshot>>,
    transition_delay: Duration,
}

impl StudyService {
    pub fn new(
        content: ContentLibrary,
        definitions: DefinitionService,
        transition_delay: Duration,
    ) -> Self {
        let state = SessionState::new();
        let (snapshots, _) = watch::channel(state.snapshot(&content));
        Self {
            content: Arc::new(content),
            definitions,
            state: Arc::new(Mutex::new(state)),
            snapshots: Arc::new(snapshots),
            transition_delay,
        }
    }

    pub fn content(&self) -> &ContentLibrary {
        &self.content
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    fn with_state<T>(&self, mutate: impl FnOnce(&mut SessionState) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        let out = mutate(&mut state);
        self.snapshots.send_replace(state.snapshot(&self.content));
        out
    }

    /// Dismiss the welcome gate. The first call schedules the glossary
    /// preload in the background; later calls change nothing.
    pub fn start(&self) -> bool {
        let first = self.with_state(|state| {
            if state.started {
                false
            } else {
                state.started = true;
                true
            }
        });
        if first {
            info!("Session started; scheduling glossary preload");
            let service = self.clone();
            tokio::spawn(async move {
                service.preload_glossary().await;
            });
        }
        first
    }

    pub fn select_view(&self, view: ViewState) {
        debug!(view = %view, "Switching active view");
        self.with_state(|state| state.active_view = view);
    }

    /// Toggle a memo section. `None` when the index is out of range;
    /// otherwise whether the section is now expanded.
    pub fn toggle_section(&self, index: usize) -> Option<bool> {
        if index >= self.content.memo_sections.len() {
            return None;
        }
        Some(self.with_state(|state| state.memo.toggle(index)))
    }

    /// The memo sections with glossary terms annotated under the current
    /// glossary snapshot.
    pub fn memo_sections(&self) -> Vec<HighlightedSection> {
        let state = self.state.lock().unwrap();
        self.content
            .memo_sections
            .iter()
            .enumerate()
            .map(|(index, section)| HighlightedSection {
                index,
                title: section.title.clone(),
                expanded: state.memo.is_expanded(index),
                fragments: highlight(&section.content, &state.glossary),
            })
            .collect()
    }

    pub fn glossary_entries(&self) -> Vec<GlossaryDefinition> {
        self.state.lock().unwrap().glossary.sorted_entries()
    }

    pub fn flip_card(&self) {
        self.with_state(|state| state.flashcards.flip());
    }

    /// Advance to the next card: the flip clears immediately, the index
    /// moves after the fixed visual-transition delay.
    pub async fn next_card(&self) -> usize {
        self.with_state(|state| state.flashcards.clear_flip());
        tokio::time::sleep(self.transition_delay).await;
        self.with_state(|state| {
            state.flashcards.advance(self.content.flashcards.len());
            state.flashcards.index
        })
    }

    pub async fn prev_card(&self) -> usize {
        self.with_state(|state| state.flashcards.clear_flip());
        tokio::time::sleep(self.transition_delay).await;
        self.with_state(|state| {
            state.flashcards.retreat(self.content.flashcards.len());
            state.flashcards.index
        })
    }

    /// Answer the current quiz question. `None` when the option index is
    /// out of range for the current question.
    pub fn answer_quiz(&self, option: usize) -> Option<AnswerOutcome> {
        self.with_state(|state| {
            let item = self.content.quiz.get(state.quiz.current)?;
            if option >= item.options.len() {
                return None;
            }
            let applied = state.quiz.select_option(option, item.correct_index);
            Some(AnswerOutcome {
                applied,
                correct: option == item.correct_index,
                correct_index: item.correct_index,
                explanation: item.explanation.clone(),
            })
        })
    }

    pub fn advance_quiz(&self) {
        self.with_state(|state| state.quiz.advance(self.content.quiz.len()));
    }

    pub fn reset_quiz(&self) {
        self.with_state(|state| state.quiz.reset());
    }

    /// Merge bulk definitions into the glossary (existing keys keep their
    /// value). Returns the number of entries added.
    pub fn merge_definitions(&self, definitions: Vec<GlossaryDefinition>) -> usize {
        self.with_state(|state| state.glossary.merge(definitions))
    }

    /// One-time bulk preload of the fixed term list.
    pub async fn preload_glossary(&self) -> PreloadOutcome {
        {
            let mut state = self.state.lock().unwrap();
            if !state.glossary.is_empty() {
                debug!("Glossary already populated; skipping preload");
                return PreloadOutcome::AlreadyLoaded;
            }
            if state.panel.preload_busy {
                debug!("Glossary preload already in flight; skipping");
                return PreloadOutcome::InFlight;
            }
            state.panel.preload_busy = true;
            self.snapshots.send_replace(state.snapshot(&self.content));
        }

        let definitions = self
            .definitions
            .fetch_definitions(&self.content.preload_terms)
            .await;

        let added = self.with_state(|state| {
            let added = state.glossary.merge(definitions);
            state.panel.preload_busy = false;
            added
        });
        info!(added, "Glossary preload finished");
        PreloadOutcome::Loaded { added }
    }

    /// The explain flow: blank check, cache lookup, then at most one remote
    /// call guarded by the busy flag. A request arriving while another is
    /// pending is rejected. The busy flag is cleared on every path.
    pub async fn explain_term(&self, raw_term: &str) -> ExplainOutcome {
        let term = raw_term.trim();
        if term.is_empty() {
            self.with_state(|state| {
                state.panel.explanation = Some(BLANK_TERM_MESSAGE.to_string());
            });
            return ExplainOutcome::BlankTerm;
        }

        let key = term.to_lowercase();
        {
            let mut state = self.state.lock().unwrap();
            if let Some(cached) = state.glossary.lookup(&key) {
                debug!(term = %key, "Explain served from glossary cache");
                let cached = cached.to_string();
                state.panel.explanation = Some(cached.clone());
                self.snapshots.send_replace(state.snapshot(&self.content));
                return ExplainOutcome::Cached(cached);
            }
            if state.panel.explain_busy {
                return ExplainOutcome::Busy;
            }
            state.panel.explain_busy = true;
            state.panel.explanation = None;
            self.snapshots.send_replace(state.snapshot(&self.content));
        }

        let explanation = self.definitions.explain_term(term).await;
        let failed = explanation.starts_with(ERROR_PREFIX);
        self.with_state(|state| {
            if !failed {
                state.glossary.upsert(&key, explanation.clone());
            }
            state.panel.explanation = Some(explanation.clone());
            state.panel.explain_busy = false;
        });

        if failed {
            ExplainOutcome::Failed(explanation)
        } else {
            info!(term = %key, "Term explained and cached");
            ExplainOutcome::Defined(explanation)
        }
    }
}
