use async_trait::async_trait;

use crate::domain::{ChatMessage, LlmModel};

#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete(
        &self,
        model: LlmModel,
        messages: &[ChatMessage],
    ) -> Result<String, LlmClientError>;

    /// Whether an API credential is configured. Checked before any network call.
    fn has_credentials(&self) -> bool {
        true
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LlmClientError {
    #[error("missing API key")]
    MissingApiKey,
    #[error("api request failed: {0}")]
    ApiRequestFailed(String),
    #[error("rate limited")]
    RateLimited,
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}
