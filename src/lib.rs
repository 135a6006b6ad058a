pub mod api;
pub mod config;
pub mod content;
pub mod definition_service;
pub mod errors;
pub mod glossary;
pub mod highlighter;
pub mod llm_providers;
pub mod logging;
pub mod models;
pub mod session;
pub mod study_service;

pub use config::Config;
pub use content::ContentLibrary;
pub use definition_service::{DefinitionService, ERROR_PREFIX, SERVICE_UNAVAILABLE_MESSAGE};
pub use errors::{ApiError, ErrorContext};
pub use glossary::Glossary;
pub use highlighter::{highlight, Fragment};
pub use llm_providers::{
    JsonResponseParser, LLMProvider, LLMProviderFactory, LLMProviderType, TextGenerator,
};
pub use models::*;
pub use session::{
    FlashcardCursor, MemoState, QuizSession, ScoreBand, SessionState, Snapshot, BLANK_TERM_MESSAGE,
};
pub use study_service::{ExplainOutcome, PreloadOutcome, StudyService};
