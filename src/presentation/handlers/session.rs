use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::{Deserialize, Serialize};

use crate::application::ports::{ContentFetcher, LlmClient, RepositoryError, VectorStore};
use crate::application::services::{
    AnswerView, ErrorKind, Interaction, InteractionOutcome, SessionView, UserFacingError,
};
use crate::domain::SessionId;
use crate::infrastructure::observability::sanitize_prompt;
use crate::presentation::state::AppState;

#[derive(Deserialize)]
pub struct SummarizeBody {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Deserialize)]
pub struct AskBody {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub model: Option<String>,
}

#[derive(Serialize)]
pub struct InteractionResponse {
    pub session: SessionDto,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AnswerDto>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorDto>,
}

#[derive(Serialize)]
pub struct SessionDto {
    pub session_id: String,
    pub summary: Option<SummaryDto>,
    pub history: Vec<TurnDto>,
}

#[derive(Serialize)]
pub struct SummaryDto {
    pub text: String,
    pub source_url: String,
    pub language: String,
    pub model: String,
}

#[derive(Serialize)]
pub struct TurnDto {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

#[derive(Serialize)]
pub struct AnswerDto {
    pub answer: String,
    pub standalone_question: String,
    pub turn_number: usize,
    pub sources: Vec<SourceDto>,
}

#[derive(Serialize)]
pub struct SourceDto {
    pub text: String,
    pub score: f32,
}

#[derive(Serialize)]
pub struct ErrorDto {
    pub kind: &'static str,
    pub message: String,
}

#[tracing::instrument(skip(state))]
pub async fn get_session_handler<F, L, V>(
    State(state): State<AppState<F, L, V>>,
    Path(session_id): Path<String>,
) -> Response
where
    F: ContentFetcher + 'static,
    L: LlmClient + 'static,
    V: VectorStore + Default + 'static,
{
    let session_id = SessionId::from_input(&session_id);
    render(
        state
            .interaction_service
            .dispatch(&session_id, Interaction::View)
            .await,
    )
}

#[tracing::instrument(skip(state, request))]
pub async fn summarize_handler<F, L, V>(
    State(state): State<AppState<F, L, V>>,
    Path(session_id): Path<String>,
    Json(request): Json<SummarizeBody>,
) -> Response
where
    F: ContentFetcher + 'static,
    L: LlmClient + 'static,
    V: VectorStore + Default + 'static,
{
    let session_id = SessionId::from_input(&session_id);
    tracing::debug!(url = %sanitize_prompt(&request.url), "Processing summarize request");

    let interaction = Interaction::Summarize {
        url: request.url,
        language: request.language,
        model: request.model,
    };
    render(
        state
            .interaction_service
            .dispatch(&session_id, interaction)
            .await,
    )
}

#[tracing::instrument(skip(state, request))]
pub async fn ask_handler<F, L, V>(
    State(state): State<AppState<F, L, V>>,
    Path(session_id): Path<String>,
    Json(request): Json<AskBody>,
) -> Response
where
    F: ContentFetcher + 'static,
    L: LlmClient + 'static,
    V: VectorStore + Default + 'static,
{
    let session_id = SessionId::from_input(&session_id);
    tracing::debug!(question = %sanitize_prompt(&request.question), "Processing question");

    let interaction = Interaction::Ask {
        question: request.question,
        model: request.model,
    };
    render(
        state
            .interaction_service
            .dispatch(&session_id, interaction)
            .await,
    )
}

fn render(result: Result<InteractionOutcome, RepositoryError>) -> Response {
    match result {
        Ok(outcome) => {
            let status = outcome
                .error
                .as_ref()
                .map(|e| status_for(e.kind))
                .unwrap_or(StatusCode::OK);
            (status, Json(InteractionResponse::from(outcome))).into_response()
        }
        Err(e) => {
            tracing::error!(error = %e, "Session store failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorDto {
                    kind: ErrorKind::Internal.as_str(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn status_for(kind: ErrorKind) -> StatusCode {
    match kind {
        ErrorKind::InvalidInput | ErrorKind::MissingCredential | ErrorKind::EmptyQuestion => {
            StatusCode::BAD_REQUEST
        }
        ErrorKind::EmptyContent | ErrorKind::NoSummary => StatusCode::UNPROCESSABLE_ENTITY,
        ErrorKind::Fetch | ErrorKind::Generation => StatusCode::BAD_GATEWAY,
        ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<InteractionOutcome> for InteractionResponse {
    fn from(outcome: InteractionOutcome) -> Self {
        Self {
            session: outcome.view.into(),
            answer: outcome.answer.map(AnswerDto::from),
            error: outcome.error.map(ErrorDto::from),
        }
    }
}

impl From<SessionView> for SessionDto {
    fn from(view: SessionView) -> Self {
        Self {
            session_id: view.session_id,
            summary: view.summary.map(|s| SummaryDto {
                text: s.text,
                source_url: s.source_url,
                language: s.language,
                model: s.model,
            }),
            history: view
                .history
                .into_iter()
                .map(|t| TurnDto {
                    number: t.number,
                    question: t.question,
                    answer: t.answer,
                })
                .collect(),
        }
    }
}

impl From<AnswerView> for AnswerDto {
    fn from(view: AnswerView) -> Self {
        Self {
            answer: view.answer,
            standalone_question: view.standalone_question,
            turn_number: view.turn_number,
            sources: view
                .sources
                .into_iter()
                .map(|s| SourceDto {
                    text: s.text,
                    score: s.score,
                })
                .collect(),
        }
    }
}

impl From<UserFacingError> for ErrorDto {
    fn from(error: UserFacingError) -> Self {
        Self {
            kind: error.kind.as_str(),
            message: error.message,
        }
    }
}
