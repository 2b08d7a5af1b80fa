use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::application::ports::{SearchResult, VectorStore, VectorStoreError};
use crate::domain::{Chunk, Embedding};

/// Brute-force cosine similarity index held in memory.
#[derive(Default)]
pub struct InMemoryVectorStore {
    entries: RwLock<Vec<(Chunk, Embedding)>>,
}

impl InMemoryVectorStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl VectorStore for InMemoryVectorStore {
    async fn upsert(
        &self,
        chunks: &[Chunk],
        embeddings: &[Embedding],
    ) -> Result<(), VectorStoreError> {
        if chunks.len() != embeddings.len() {
            return Err(VectorStoreError::UpsertFailed(format!(
                "{} chunks but {} embeddings",
                chunks.len(),
                embeddings.len()
            )));
        }

        let mut entries = self.entries.write().await;
        let expected = entries
            .first()
            .map(|(_, e)| e.dimensions())
            .or_else(|| embeddings.first().map(Embedding::dimensions));

        if let Some(expected) = expected {
            if let Some(bad) = embeddings.iter().find(|e| e.dimensions() != expected) {
                return Err(VectorStoreError::DimensionMismatch {
                    expected,
                    actual: bad.dimensions(),
                });
            }
        }

        for (chunk, embedding) in chunks.iter().zip(embeddings) {
            match entries.iter_mut().find(|(c, _)| c.id == chunk.id) {
                Some(entry) => *entry = (chunk.clone(), embedding.clone()),
                None => entries.push((chunk.clone(), embedding.clone())),
            }
        }

        Ok(())
    }

    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
    ) -> Result<Vec<SearchResult>, VectorStoreError> {
        let entries = self.entries.read().await;

        if let Some((_, first)) = entries.first() {
            if first.dimensions() != embedding.dimensions() {
                return Err(VectorStoreError::DimensionMismatch {
                    expected: first.dimensions(),
                    actual: embedding.dimensions(),
                });
            }
        }

        let mut scored: Vec<SearchResult> = entries
            .iter()
            .map(|(chunk, stored)| SearchResult {
                chunk: chunk.clone(),
                score: stored.cosine_similarity(embedding),
            })
            .collect();

        // Stable sort keeps insertion order among equal scores.
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));
        scored.truncate(top_k);

        Ok(scored)
    }

    async fn len(&self) -> Result<usize, VectorStoreError> {
        Ok(self.entries.read().await.len())
    }
}
