use std::marker::PhantomData;
use std::sync::Arc;

use crate::application::ports::{
    Embedder, EmbedderError, SearchResult, TextSplitter, TextSplitterError, VectorStore,
    VectorStoreError,
};

/// Builds a throwaway similarity index over a summary.
///
/// A new store of type `V` is created for every build, so nothing is shared
/// between questions or between summaries.
pub struct RetrievalIndexBuilder<V>
where
    V: VectorStore + Default,
{
    embedder: Arc<dyn Embedder>,
    text_splitter: Arc<dyn TextSplitter>,
    _store: PhantomData<fn() -> V>,
}

impl<V> RetrievalIndexBuilder<V>
where
    V: VectorStore + Default,
{
    pub fn new(embedder: Arc<dyn Embedder>, text_splitter: Arc<dyn TextSplitter>) -> Self {
        Self {
            embedder,
            text_splitter,
            _store: PhantomData,
        }
    }

    pub async fn build(&self, text: &str) -> Result<RetrievalIndex<V>, IndexError> {
        let chunks = self.text_splitter.split(text).await?;
        let store = V::default();

        if !chunks.is_empty() {
            let texts: Vec<&str> = chunks.iter().map(|c| c.text.as_str()).collect();
            let embeddings = self.embedder.embed_batch(&texts).await?;
            store.upsert(&chunks, &embeddings).await?;
        }

        tracing::debug!(chunks = chunks.len(), "Retrieval index built");

        Ok(RetrievalIndex {
            embedder: Arc::clone(&self.embedder),
            store,
        })
    }
}

pub struct RetrievalIndex<V>
where
    V: VectorStore,
{
    embedder: Arc<dyn Embedder>,
    store: V,
}

impl<V> RetrievalIndex<V>
where
    V: VectorStore,
{
    pub async fn retrieve(
        &self,
        query: &str,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, IndexError> {
        if self.store.len().await? == 0 {
            return Ok(Vec::new());
        }

        let query_embedding = self.embedder.embed(query).await?;
        Ok(self.store.search(&query_embedding, top_k).await?)
    }

    pub async fn len(&self) -> Result<usize, IndexError> {
        Ok(self.store.len().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("text splitting: {0}")]
    Splitting(#[from] TextSplitterError),
    #[error("embedding: {0}")]
    Embedding(#[from] EmbedderError),
    #[error("vector store: {0}")]
    Storage(#[from] VectorStoreError),
}
