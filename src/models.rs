use serde::{Deserialize, Serialize};
use std::fmt;

/// One collapsible section of the memo card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoSection {
    pub title: String,
    pub content: String,
}

/// A question/answer pair navigated circularly in the flashcard view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Flashcard {
    pub question: String,
    pub answer: String,
}

/// A multiple-choice quiz question with its correction text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizItem {
    pub question: String,
    pub options: Vec<String>,
    pub correct_index: usize,
    pub explanation: String,
}

/// A term/definition pair, as produced by the bulk definition request and
/// as listed in the glossary view. Terms are stored lowercased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlossaryDefinition {
    pub term: String,
    pub definition: String,
}

/// External media embedded by the presentation layer (video, Kahoot
/// challenge, podcast). The core only hands the links out.
#[derive(Debug, Clone, Serialize)]
pub struct MediaLinks {
    pub video_url: String,
    pub kahoot_url: String,
    pub podcast_audio_url: String,
    pub podcast_image_url: String,
}

/// The currently active tab. Exactly one is active at a time; switching has
/// no side effect on the other views' state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewState {
    Memo,
    Flashcards,
    Quiz,
    Kahoot,
    Video,
    Glossary,
    Podcast,
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::Memo
    }
}

impl ViewState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewState::Memo => "memo",
            ViewState::Flashcards => "flashcards",
            ViewState::Quiz => "quiz",
            ViewState::Kahoot => "kahoot",
            ViewState::Video => "video",
            ViewState::Glossary => "glossary",
            ViewState::Podcast => "podcast",
        }
    }
}

impl fmt::Display for ViewState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
