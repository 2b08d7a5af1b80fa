use std::fmt;
use std::sync::Arc;

use crate::application::ports::{
    ContentFetcher, EmbedderError, LlmClient, RepositoryError, SessionStore, VectorStore,
};
use crate::domain::{LlmModel, Session, SessionId, TargetLanguage};

use super::conversation_service::{AskError, AskResponse, ConversationService};
use super::retrieval_index::IndexError;
use super::summarization_service::{SummarizationService, SummarizeError, SummarizeRequest};

/// A discrete user action against one session.
#[derive(Debug, Clone)]
pub enum Interaction {
    Summarize {
        url: String,
        language: Option<String>,
        model: Option<String>,
    },
    Ask {
        question: String,
        model: Option<String>,
    },
    View,
}

impl Interaction {
    fn name(&self) -> &'static str {
        match self {
            Interaction::Summarize { .. } => "summarize",
            Interaction::Ask { .. } => "ask",
            Interaction::View => "view",
        }
    }
}

/// What to render after an interaction: the session as it now stands, plus
/// either the fresh answer or the error that stopped the action.
#[derive(Debug, Clone)]
pub struct InteractionOutcome {
    pub view: SessionView,
    pub answer: Option<AnswerView>,
    pub error: Option<UserFacingError>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SessionView {
    pub session_id: String,
    pub summary: Option<SummaryView>,
    pub history: Vec<TurnView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryView {
    pub text: String,
    pub source_url: String,
    pub language: String,
    pub model: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TurnView {
    pub number: usize,
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AnswerView {
    pub answer: String,
    pub standalone_question: String,
    pub turn_number: usize,
    pub sources: Vec<SourceView>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SourceView {
    pub text: String,
    pub score: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    InvalidInput,
    MissingCredential,
    Fetch,
    EmptyContent,
    Generation,
    EmptyQuestion,
    NoSummary,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidInput => "invalid_input",
            ErrorKind::MissingCredential => "missing_credential",
            ErrorKind::Fetch => "fetch_failed",
            ErrorKind::EmptyContent => "empty_content",
            ErrorKind::Generation => "generation_failed",
            ErrorKind::EmptyQuestion => "empty_question",
            ErrorKind::NoSummary => "no_summary",
            ErrorKind::Internal => "internal",
        }
    }
}

/// Message shown to the user in place of the result it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserFacingError {
    pub kind: ErrorKind,
    pub message: String,
}

impl UserFacingError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for UserFacingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl From<SummarizeError> for UserFacingError {
    fn from(error: SummarizeError) -> Self {
        match error {
            SummarizeError::InvalidUrl(e) => Self::new(ErrorKind::InvalidInput, e.to_string()),
            SummarizeError::MissingCredential => Self::new(
                ErrorKind::MissingCredential,
                "Please provide the information to get started: the LLM API key is not configured",
            ),
            SummarizeError::Fetch(e) => Self::new(
                ErrorKind::Fetch,
                format!("Failed to load content from the URL: {}", e),
            ),
            SummarizeError::EmptyContent => Self::new(
                ErrorKind::EmptyContent,
                "Failed to extract content from the provided URL.",
            ),
            SummarizeError::Generation(e) => Self::new(
                ErrorKind::Generation,
                format!("Failed to generate the summary: {}", e),
            ),
            SummarizeError::EmptySummary => {
                Self::new(ErrorKind::Generation, "Failed to generate the summary.")
            }
            SummarizeError::Storage(e) => Self::new(ErrorKind::Internal, e.to_string()),
        }
    }
}

impl From<AskError> for UserFacingError {
    fn from(error: AskError) -> Self {
        match error {
            AskError::EmptyQuestion => Self::new(ErrorKind::EmptyQuestion, "Please enter a question."),
            AskError::MissingCredential => Self::new(
                ErrorKind::MissingCredential,
                "Please provide the information to get started: the LLM API key is not configured",
            ),
            AskError::NoSummary => Self::new(
                ErrorKind::NoSummary,
                "Summarize a website before asking questions about it.",
            ),
            AskError::Index(IndexError::Embedding(EmbedderError::MissingApiKey)) => Self::new(
                ErrorKind::MissingCredential,
                "Please provide the information to get started: the embedding service token is not configured",
            ),
            AskError::Storage(e) => Self::new(ErrorKind::Internal, e.to_string()),
            other => Self::new(
                ErrorKind::Generation,
                format!("Error processing the question: {}", other),
            ),
        }
    }
}

impl From<&Session> for SessionView {
    fn from(session: &Session) -> Self {
        Self {
            session_id: session.id.to_string(),
            summary: session.summary().map(|s| SummaryView {
                text: s.text.clone(),
                source_url: s.source_url.to_string(),
                language: s.language.to_string(),
                model: s.model.to_string(),
            }),
            history: session
                .turns()
                .iter()
                .enumerate()
                .map(|(idx, turn)| TurnView {
                    number: idx + 1,
                    question: turn.question.clone(),
                    answer: turn.answer.clone(),
                })
                .collect(),
        }
    }
}

impl From<AskResponse> for AnswerView {
    fn from(response: AskResponse) -> Self {
        Self {
            answer: response.answer,
            standalone_question: response.standalone_question,
            turn_number: response.turn_number,
            sources: response
                .sources
                .into_iter()
                .map(|s| SourceView {
                    text: s.text,
                    score: s.score,
                })
                .collect(),
        }
    }
}

/// Dispatches one interaction at a time and renders the session afterwards.
pub struct InteractionService<F, L, V>
where
    F: ContentFetcher,
    L: LlmClient,
    V: VectorStore + Default,
{
    summarization_service: SummarizationService<F, L>,
    conversation_service: ConversationService<L, V>,
    session_store: Arc<dyn SessionStore>,
    default_model: LlmModel,
}

impl<F, L, V> InteractionService<F, L, V>
where
    F: ContentFetcher,
    L: LlmClient,
    V: VectorStore + Default,
{
    pub fn new(
        summarization_service: SummarizationService<F, L>,
        conversation_service: ConversationService<L, V>,
        session_store: Arc<dyn SessionStore>,
        default_model: LlmModel,
    ) -> Self {
        Self {
            summarization_service,
            conversation_service,
            session_store,
            default_model,
        }
    }

    pub fn default_model(&self) -> LlmModel {
        self.default_model
    }

    /// User-facing failures come back inside the outcome; only a store that
    /// cannot produce the session view is an `Err`.
    pub async fn dispatch(
        &self,
        session_id: &SessionId,
        interaction: Interaction,
    ) -> Result<InteractionOutcome, RepositoryError> {
        let action = interaction.name();
        let result = match interaction {
            Interaction::Summarize {
                url,
                language,
                model,
            } => self.summarize(session_id, url, language, model).await,
            Interaction::Ask { question, model } => self.ask(session_id, question, model).await,
            Interaction::View => Ok(None),
        };

        let (answer, error) = match result {
            Ok(answer) => (answer, None),
            Err(error) => {
                tracing::warn!(
                    session_id = %session_id,
                    action,
                    kind = error.kind.as_str(),
                    error = %error,
                    "Interaction failed"
                );
                (None, Some(error))
            }
        };

        let session = self.session_store.get_or_create(session_id).await?;

        Ok(InteractionOutcome {
            view: SessionView::from(&session),
            answer,
            error,
        })
    }

    async fn summarize(
        &self,
        session_id: &SessionId,
        url: String,
        language: Option<String>,
        model: Option<String>,
    ) -> Result<Option<AnswerView>, UserFacingError> {
        let request = SummarizeRequest {
            url,
            language: TargetLanguage::from_input(language.as_deref()),
            model: self.resolve_model(model.as_deref())?,
        };
        self.summarization_service
            .summarize(session_id, request)
            .await?;
        Ok(None)
    }

    async fn ask(
        &self,
        session_id: &SessionId,
        question: String,
        model: Option<String>,
    ) -> Result<Option<AnswerView>, UserFacingError> {
        let model = self.resolve_model(model.as_deref())?;
        let response = self
            .conversation_service
            .ask(session_id, &question, model)
            .await?;
        Ok(Some(response.into()))
    }

    fn resolve_model(&self, requested: Option<&str>) -> Result<LlmModel, UserFacingError> {
        match requested.map(str::trim) {
            None | Some("") => Ok(self.default_model),
            Some(name) => name
                .parse()
                .map_err(|e: String| UserFacingError::new(ErrorKind::InvalidInput, e)),
        }
    }
}
