use std::convert::Infallible;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    response::Json,
    routing::{get, post},
    Router,
};
use futures_util::stream::Stream;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::{
    content::ContentLibrary,
    errors::{ApiError, ErrorContext},
    models::{GlossaryDefinition, ViewState},
    session::{Snapshot, BLANK_TERM_MESSAGE},
    study_service::{
        AnswerOutcome, ExplainOutcome, HighlightedSection, PreloadOutcome, StudyService,
    },
};

// Import logging macros
use crate::{log_api_start, log_api_success, log_api_warn};

#[derive(Clone)]
pub struct AppState {
    pub study_service: StudyService,
}

#[derive(Deserialize)]
pub struct SelectViewRequest {
    pub view: ViewState,
}

#[derive(Deserialize)]
pub struct AnswerRequest {
    pub option: usize,
}

#[derive(Deserialize)]
pub struct ExplainRequest {
    pub term: String,
}

#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(message: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message),
        }
    }
}

#[derive(Serialize)]
pub struct StartResponse {
    /// Whether this call dismissed the welcome screen (and scheduled the
    /// glossary preload).
    pub first_start: bool,
    pub state: Snapshot,
}

#[derive(Serialize)]
pub struct ToggleSectionResponse {
    pub index: usize,
    pub expanded: bool,
    pub state: Snapshot,
}

#[derive(Serialize)]
pub struct AnswerResponse {
    #[serde(flatten)]
    pub outcome: AnswerOutcome,
    pub state: Snapshot,
}

#[derive(Serialize)]
pub struct PreloadResponse {
    pub status: &'static str,
    pub added: usize,
    pub state: Snapshot,
}

#[derive(Serialize)]
pub struct ExplainResponse {
    /// Where the explanation came from: "input", "cache", "remote" or
    /// "error".
    pub source: &'static str,
    pub explanation: String,
    pub state: Snapshot,
}

type ApiResult<T> = Result<Json<ApiResponse<T>>, (StatusCode, Json<ApiResponse<()>>)>;

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/api/state", get(get_state))
        .route("/api/state/stream", get(stream_state))
        .route("/api/content", get(get_content))
        .route("/api/memo", get(get_memo))
        .route("/api/memo/:index/toggle", post(toggle_section))
        .route("/api/session/start", post(start_session))
        .route("/api/view", post(select_view))
        .route("/api/flashcards/flip", post(flip_card))
        .route("/api/flashcards/next", post(next_card))
        .route("/api/flashcards/prev", post(prev_card))
        .route("/api/quiz/answer", post(answer_quiz))
        .route("/api/quiz/next", post(advance_quiz))
        .route("/api/quiz/reset", post(reset_quiz))
        .route("/api/glossary", get(get_glossary))
        .route("/api/glossary/preload", post(preload_glossary))
        .route("/api/glossary/explain", post(explain_term))
        .with_state(state)
}

// Session endpoints

pub async fn get_state(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    Json(ApiResponse::success(state.study_service.snapshot()))
}

/// Server-sent-events stream of state snapshots. The current snapshot is
/// emitted first, then one event per mutation.
pub async fn stream_state(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut receiver = state.study_service.subscribe();
    receiver.mark_changed();

    let stream = futures_util::stream::unfold(receiver, |mut receiver| async move {
        if receiver.changed().await.is_err() {
            return None;
        }
        let snapshot = receiver.borrow_and_update().clone();
        let event = Event::default()
            .json_data(&snapshot)
            .unwrap_or_else(|_| Event::default().data("{}"));
        Some((Ok::<_, Infallible>(event), receiver))
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

pub async fn get_content(State(state): State<AppState>) -> Json<ApiResponse<ContentLibrary>> {
    Json(ApiResponse::success(state.study_service.content().clone()))
}

pub async fn start_session(State(state): State<AppState>) -> Json<ApiResponse<StartResponse>> {
    log_api_start!("start_session");
    let first_start = state.study_service.start();
    if first_start {
        log_api_success!("start_session", "welcome screen dismissed, preload scheduled");
    }
    Json(ApiResponse::success(StartResponse {
        first_start,
        state: state.study_service.snapshot(),
    }))
}

pub async fn select_view(
    State(state): State<AppState>,
    Json(request): Json<SelectViewRequest>,
) -> Json<ApiResponse<Snapshot>> {
    log_api_start!("select_view", view = request.view);
    state.study_service.select_view(request.view);
    Json(ApiResponse::success(state.study_service.snapshot()))
}

// Memo endpoints

pub async fn get_memo(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<HighlightedSection>>> {
    Json(ApiResponse::success(state.study_service.memo_sections()))
}

pub async fn toggle_section(
    State(state): State<AppState>,
    Path(index): Path<usize>,
) -> ApiResult<ToggleSectionResponse> {
    log_api_start!("toggle_section", index = index);
    match state.study_service.toggle_section(index) {
        Some(expanded) => Ok(Json(ApiResponse::success(ToggleSectionResponse {
            index,
            expanded,
            state: state.study_service.snapshot(),
        }))),
        None => {
            let error = ApiError::NotFound(format!("Memo section {} does not exist", index));
            let context =
                ErrorContext::new("toggle_section", "memo_section").with_detail(&index.to_string());
            Err(error.to_response_with_context(context))
        }
    }
}

// Flashcard endpoints

pub async fn flip_card(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    state.study_service.flip_card();
    Json(ApiResponse::success(state.study_service.snapshot()))
}

pub async fn next_card(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    let index = state.study_service.next_card().await;
    info!(index, "Advanced to next flashcard");
    Json(ApiResponse::success(state.study_service.snapshot()))
}

pub async fn prev_card(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    let index = state.study_service.prev_card().await;
    info!(index, "Moved to previous flashcard");
    Json(ApiResponse::success(state.study_service.snapshot()))
}

// Quiz endpoints

pub async fn answer_quiz(
    State(state): State<AppState>,
    Json(request): Json<AnswerRequest>,
) -> ApiResult<AnswerResponse> {
    log_api_start!("answer_quiz", index = request.option);
    match state.study_service.answer_quiz(request.option) {
        Some(outcome) => {
            if !outcome.applied {
                log_api_warn!("answer_quiz", "selection ignored, question already answered");
            }
            Ok(Json(ApiResponse::success(AnswerResponse {
                outcome,
                state: state.study_service.snapshot(),
            })))
        }
        None => {
            let error = ApiError::ValidationError(format!(
                "Option {} is out of range for the current question",
                request.option
            ));
            let context = ErrorContext::new("answer_quiz", "quiz_question")
                .with_detail(&request.option.to_string());
            Err(error.to_response_with_context(context))
        }
    }
}

pub async fn advance_quiz(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    state.study_service.advance_quiz();
    Json(ApiResponse::success(state.study_service.snapshot()))
}

pub async fn reset_quiz(State(state): State<AppState>) -> Json<ApiResponse<Snapshot>> {
    log_api_start!("reset_quiz");
    state.study_service.reset_quiz();
    Json(ApiResponse::success(state.study_service.snapshot()))
}

// Glossary endpoints

pub async fn get_glossary(
    State(state): State<AppState>,
) -> Json<ApiResponse<Vec<GlossaryDefinition>>> {
    Json(ApiResponse::success(state.study_service.glossary_entries()))
}

pub async fn preload_glossary(
    State(state): State<AppState>,
) -> Json<ApiResponse<PreloadResponse>> {
    log_api_start!("preload_glossary");
    let outcome = state.study_service.preload_glossary().await;
    let (status, added) = match outcome {
        PreloadOutcome::Loaded { added } => {
            log_api_success!("preload_glossary", count = added, "terms defined");
            ("loaded", added)
        }
        PreloadOutcome::AlreadyLoaded => ("already_loaded", 0),
        PreloadOutcome::InFlight => {
            log_api_warn!("preload_glossary", "preload already in flight");
            ("in_flight", 0)
        }
    };
    Json(ApiResponse::success(PreloadResponse {
        status,
        added,
        state: state.study_service.snapshot(),
    }))
}

pub async fn explain_term(
    State(state): State<AppState>,
    Json(request): Json<ExplainRequest>,
) -> ApiResult<ExplainResponse> {
    log_api_start!("explain_term", term = request.term);
    let outcome = state.study_service.explain_term(&request.term).await;
    let (source, explanation) = match outcome {
        ExplainOutcome::BlankTerm => {
            log_api_warn!("explain_term", term = request.term, "blank term submitted");
            ("input", BLANK_TERM_MESSAGE.to_string())
        }
        ExplainOutcome::Cached(explanation) => ("cache", explanation),
        ExplainOutcome::Defined(explanation) => {
            log_api_success!("explain_term", term = request.term, "definition cached");
            ("remote", explanation)
        }
        ExplainOutcome::Failed(explanation) => ("error", explanation),
        ExplainOutcome::Busy => {
            let error = ApiError::LookupBusy(
                "Another term explanation is still pending".to_string(),
            );
            let context =
                ErrorContext::new("explain_term", "glossary").with_detail(&request.term);
            return Err(error.to_response_with_context(context));
        }
    };
    Ok(Json(ApiResponse::success(ExplainResponse {
        source,
        explanation,
        state: state.study_service.snapshot(),
    })))
}
