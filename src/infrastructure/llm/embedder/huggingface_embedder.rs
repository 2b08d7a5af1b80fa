use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

pub const HUGGINGFACE_INFERENCE_URL: &str = "https://api-inference.huggingface.co";

/// Sentence embeddings from the Hugging Face inference API feature-extraction pipeline.
pub struct HuggingFaceEmbedder {
    client: Client,
    base_url: String,
    token: String,
    model: String,
}

#[derive(Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [&'a str],
    options: RequestOptions,
}

#[derive(Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

impl HuggingFaceEmbedder {
    pub fn new(token: String, model: String, timeout: Duration) -> Result<Self, EmbedderError> {
        Self::with_base_url(HUGGINGFACE_INFERENCE_URL.to_string(), token, model, timeout)
    }

    /// Every request, including waiting for a cold model, is bounded by `timeout`.
    pub fn with_base_url(
        base_url: String,
        token: String,
        model: String,
        timeout: Duration,
    ) -> Result<Self, EmbedderError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| EmbedderError::ApiRequestFailed(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.trim().to_string(),
            model,
        })
    }
}

#[async_trait]
impl Embedder for HuggingFaceEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.embed_batch(&[text])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| EmbedderError::InvalidResponse("empty response".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        if self.token.is_empty() {
            return Err(EmbedderError::MissingApiKey);
        }

        let response = self
            .client
            .post(format!(
                "{}/pipeline/feature-extraction/{}",
                self.base_url, self.model
            ))
            .bearer_auth(&self.token)
            .json(&FeatureExtractionRequest {
                inputs: texts,
                options: RequestOptions {
                    wait_for_model: true,
                },
            })
            .send()
            .await
            .map_err(|e| EmbedderError::ApiRequestFailed(e.to_string()))?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(EmbedderError::RateLimited);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(EmbedderError::ApiRequestFailed(format!(
                "HTTP {}: {}",
                status, body
            )));
        }

        let vectors: Vec<Vec<f32>> = response
            .json()
            .await
            .map_err(|e| EmbedderError::InvalidResponse(e.to_string()))?;

        if vectors.len() != texts.len() {
            return Err(EmbedderError::InvalidResponse(format!(
                "expected {} embeddings, got {}",
                texts.len(),
                vectors.len()
            )));
        }

        Ok(vectors.into_iter().map(Embedding::new).collect())
    }
}
