use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::Embedder;
use crate::presentation::config::{EmbeddingProvider, EmbeddingsSettings};

use super::{HuggingFaceEmbedder, LocalCandleEmbedder};

pub struct EmbedderFactory;

#[derive(Debug, thiserror::Error)]
pub enum EmbedderFactoryError {
    #[error("model initialization failed: {0}")]
    InitializationFailed(String),
}

impl EmbedderFactory {
    /// A missing Hugging Face token is not an error here; it surfaces to the
    /// user on the first question instead.
    pub fn create(
        settings: &EmbeddingsSettings,
    ) -> Result<Arc<dyn Embedder>, EmbedderFactoryError> {
        match settings.provider {
            EmbeddingProvider::Local => {
                let embedder = LocalCandleEmbedder::new(&settings.model)
                    .map_err(|e| EmbedderFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(embedder))
            }
            EmbeddingProvider::HuggingFace => {
                if settings.api_key.trim().is_empty() {
                    tracing::warn!(
                        "HF_TOKEN is not set; questions will fail until it is configured"
                    );
                }
                tracing::info!(
                    model = %settings.model,
                    timeout_secs = settings.timeout_secs,
                    "Using Hugging Face inference embeddings"
                );
                let embedder = HuggingFaceEmbedder::new(
                    settings.api_key.clone(),
                    settings.model.clone(),
                    Duration::from_secs(settings.timeout_secs),
                )
                .map_err(|e| EmbedderFactoryError::InitializationFailed(e.to_string()))?;
                Ok(Arc::new(embedder))
            }
        }
    }
}
