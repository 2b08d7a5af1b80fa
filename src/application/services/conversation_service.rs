use std::sync::Arc;

use crate::application::ports::{
    LlmClient, LlmClientError, RepositoryError, SessionStore, VectorStore,
};
use crate::domain::{ChatHistory, ConversationTurn, LlmModel, SessionId};

use super::prompts;
use super::retrieval_index::{IndexError, RetrievalIndexBuilder};

/// History-aware question answering over a session's summary.
pub struct ConversationService<L, V>
where
    L: LlmClient,
    V: VectorStore + Default,
{
    llm_client: Arc<L>,
    index_builder: RetrievalIndexBuilder<V>,
    session_store: Arc<dyn SessionStore>,
    top_k: usize,
}

impl<L, V> ConversationService<L, V>
where
    L: LlmClient,
    V: VectorStore + Default,
{
    pub fn new(
        llm_client: Arc<L>,
        index_builder: RetrievalIndexBuilder<V>,
        session_store: Arc<dyn SessionStore>,
        top_k: usize,
    ) -> Self {
        Self {
            llm_client,
            index_builder,
            session_store,
            top_k,
        }
    }

    /// Answers `question` and records the exchange.
    ///
    /// Nothing is written to the session unless every stage succeeded.
    pub async fn ask(
        &self,
        session_id: &SessionId,
        question: &str,
        model: LlmModel,
    ) -> Result<AskResponse, AskError> {
        let question = question.trim();
        if question.is_empty() {
            return Err(AskError::EmptyQuestion);
        }
        if !self.llm_client.has_credentials() {
            return Err(AskError::MissingCredential);
        }

        let session = self.session_store.get_or_create(session_id).await?;
        let summary = session.summary().ok_or(AskError::NoSummary)?;
        let history = session.chat_history();

        let standalone_question = self.contextualize(history, question, model).await?;

        let index = self.index_builder.build(&summary.text).await?;
        let results = index.retrieve(&standalone_question, self.top_k).await?;

        tracing::debug!(
            session_id = %session_id,
            retrieved = results.len(),
            rewritten = standalone_question != question,
            "Context retrieved"
        );

        let context = results
            .iter()
            .map(|r| r.chunk.text.as_str())
            .collect::<Vec<_>>()
            .join(prompts::CONTEXT_SEPARATOR);

        let messages = prompts::answer_messages(&context, history, question);
        let answer = self
            .llm_client
            .complete(model, &messages)
            .await
            .map_err(AskError::Generation)?;

        let answer = answer.trim();
        if answer.is_empty() {
            return Err(AskError::EmptyAnswer);
        }

        let turn_number = self
            .session_store
            .commit_turn(session_id, ConversationTurn::new(question, answer))
            .await?;

        let sources = results
            .into_iter()
            .map(|r| SourceChunk {
                text: r.chunk.text,
                score: r.score,
            })
            .collect();

        Ok(AskResponse {
            answer: answer.to_string(),
            standalone_question,
            sources,
            turn_number,
        })
    }

    /// Rewrites a follow-up into a question that stands on its own.
    ///
    /// Without history there is nothing to resolve and the question is
    /// returned unchanged without calling the model.
    async fn contextualize(
        &self,
        history: &ChatHistory,
        question: &str,
        model: LlmModel,
    ) -> Result<String, AskError> {
        if history.is_empty() {
            return Ok(question.to_string());
        }

        let messages = prompts::contextualize_messages(history, question);
        let rewritten = self
            .llm_client
            .complete(model, &messages)
            .await
            .map_err(AskError::Rewrite)?;

        let rewritten = rewritten.trim();
        if rewritten.is_empty() {
            tracing::warn!("Question rewrite came back empty, using the original question");
            return Ok(question.to_string());
        }

        Ok(rewritten.to_string())
    }
}

#[derive(Debug, Clone)]
pub struct AskResponse {
    pub answer: String,
    pub standalone_question: String,
    pub sources: Vec<SourceChunk>,
    pub turn_number: usize,
}

#[derive(Debug, Clone)]
pub struct SourceChunk {
    pub text: String,
    pub score: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum AskError {
    #[error("question is empty")]
    EmptyQuestion,
    #[error("LLM API key is not configured")]
    MissingCredential,
    #[error("no summary in this session")]
    NoSummary,
    #[error("question rewrite: {0}")]
    Rewrite(LlmClientError),
    #[error("retrieval: {0}")]
    Index(#[from] IndexError),
    #[error("completion: {0}")]
    Generation(LlmClientError),
    #[error("model returned an empty answer")]
    EmptyAnswer,
    #[error("storage: {0}")]
    Storage(#[from] RepositoryError),
}
