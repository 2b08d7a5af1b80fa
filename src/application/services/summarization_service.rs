use std::sync::Arc;

use crate::application::ports::{
    ContentFetcher, ContentFetcherError, LlmClient, LlmClientError, RepositoryError, SessionStore,
};
use crate::domain::{LlmModel, SessionId, Summary, TargetLanguage, UrlValidationError, WebUrl};

use super::prompts;

pub struct SummarizationService<F, L>
where
    F: ContentFetcher,
    L: LlmClient,
{
    content_fetcher: Arc<F>,
    llm_client: Arc<L>,
    session_store: Arc<dyn SessionStore>,
}

#[derive(Debug, Clone)]
pub struct SummarizeRequest {
    pub url: String,
    pub language: TargetLanguage,
    pub model: LlmModel,
}

impl<F, L> SummarizationService<F, L>
where
    F: ContentFetcher,
    L: LlmClient,
{
    pub fn new(
        content_fetcher: Arc<F>,
        llm_client: Arc<L>,
        session_store: Arc<dyn SessionStore>,
    ) -> Self {
        Self {
            content_fetcher,
            llm_client,
            session_store,
        }
    }

    /// Fetches, summarizes and stores the result as the session's only summary.
    ///
    /// The session is written once, after the model returned a non-empty
    /// summary; every earlier failure leaves the previous summary in place.
    pub async fn summarize(
        &self,
        session_id: &SessionId,
        request: SummarizeRequest,
    ) -> Result<Summary, SummarizeError> {
        if !self.llm_client.has_credentials() {
            return Err(SummarizeError::MissingCredential);
        }

        let url = WebUrl::parse(&request.url)?;

        tracing::info!(
            session_id = %session_id,
            host = url.host(),
            language = %request.language,
            model = %request.model,
            "Fetching page for summarization"
        );

        let page = self
            .content_fetcher
            .fetch(&url)
            .await
            .map_err(SummarizeError::Fetch)?;

        if page.text.trim().is_empty() {
            tracing::warn!(host = url.host(), "Fetched page yielded no text");
            return Err(SummarizeError::EmptyContent);
        }

        tracing::debug!(
            title = page.title.as_deref().unwrap_or("[untitled]"),
            chars = page.text.chars().count(),
            "Page content extracted"
        );

        let messages = prompts::summary_messages(&page.text, &request.language);
        let output = self
            .llm_client
            .complete(request.model, &messages)
            .await
            .map_err(SummarizeError::Generation)?;

        let text = output.trim();
        if text.is_empty() {
            return Err(SummarizeError::EmptySummary);
        }

        let summary = Summary::new(text.to_string(), url, request.language, request.model);
        self.session_store
            .set_summary(session_id, summary.clone())
            .await?;

        tracing::info!(
            session_id = %session_id,
            summary_chars = summary.text.chars().count(),
            "Summary stored"
        );

        Ok(summary)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SummarizeError {
    #[error(transparent)]
    InvalidUrl(#[from] UrlValidationError),
    #[error("LLM API key is not configured")]
    MissingCredential,
    #[error("fetch: {0}")]
    Fetch(ContentFetcherError),
    #[error("fetched page contained no text")]
    EmptyContent,
    #[error("generation: {0}")]
    Generation(LlmClientError),
    #[error("model returned an empty summary")]
    EmptySummary,
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}
