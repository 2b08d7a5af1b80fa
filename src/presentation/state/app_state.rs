use std::sync::Arc;

use crate::application::ports::{ContentFetcher, LlmClient, VectorStore};
use crate::application::services::InteractionService;

pub struct AppState<F, L, V>
where
    F: ContentFetcher,
    L: LlmClient,
    V: VectorStore + Default,
{
    pub interaction_service: Arc<InteractionService<F, L, V>>,
}

impl<F, L, V> Clone for AppState<F, L, V>
where
    F: ContentFetcher,
    L: LlmClient,
    V: VectorStore + Default,
{
    fn clone(&self) -> Self {
        Self {
            interaction_service: Arc::clone(&self.interaction_service),
        }
    }
}
