use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use tokenizers::{Encoding, Tokenizer, TruncationParams};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

/// BERT sentence embeddings computed in-process: mean pooling over the
/// attention mask followed by L2 normalization.
pub struct LocalCandleEmbedder {
    inner: Arc<EncoderState>,
}

struct EncoderState {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

struct ModelFiles {
    config: PathBuf,
    tokenizer: PathBuf,
    weights: PathBuf,
}

impl LocalCandleEmbedder {
    /// Downloads (or reuses the hub cache for) `model_id` and loads it.
    pub fn new(model_id: &str) -> Result<Self, EmbedderError> {
        let device = Device::new_metal(0).unwrap_or(Device::Cpu);
        tracing::info!(device = ?device, model = model_id, "Loading local embedding model");

        let files = fetch_model_files(model_id)?;

        let config_contents = std::fs::read_to_string(&files.config)
            .map_err(|e| load_err("read config", e))?;
        let config: BertConfig =
            serde_json::from_str(&config_contents).map_err(|e| load_err("parse config", e))?;

        let mut tokenizer =
            Tokenizer::from_file(&files.tokenizer).map_err(|e| load_err("tokenizer", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(|e| load_err("truncation", e))?;

        let dtype = if device.is_cpu() {
            DType::F32
        } else {
            DType::F16
        };

        // SAFETY: the safetensors file is memory-mapped read-only and not modified while mapped.
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[files.weights], dtype, &device)
                .map_err(|e| load_err("weights", e))?
        };
        let model = BertModel::load(vb, &config).map_err(|e| load_err("model", e))?;

        tracing::info!(model = model_id, "Local embedding model ready");

        Ok(Self {
            inner: Arc::new(EncoderState {
                model,
                tokenizer,
                device,
            }),
        })
    }

    async fn encode(&self, texts: Vec<String>) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let state = Arc::clone(&self.inner);
        tokio::task::spawn_blocking(move || state.encode(&texts))
            .await
            .map_err(|e| EmbedderError::InferenceFailed(format!("encoder task: {}", e)))?
    }
}

fn fetch_model_files(model_id: &str) -> Result<ModelFiles, EmbedderError> {
    let api = Api::new().map_err(|e| load_err("hub", e))?;
    let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));
    let get = |name: &str| repo.get(name).map_err(|e| load_err(name, e));

    Ok(ModelFiles {
        config: get("config.json")?,
        tokenizer: get("tokenizer.json")?,
        weights: get("model.safetensors")?,
    })
}

impl EncoderState {
    fn encode(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let inputs: Vec<&str> = texts.iter().map(String::as_str).collect();
        let encodings = self
            .tokenizer
            .encode_batch(inputs, true)
            .map_err(|e| infer_err("tokenization", e))?;

        let batch = encodings.len();
        let width = encodings
            .iter()
            .map(|e| e.get_ids().len())
            .max()
            .unwrap_or(0);

        let padded = |select: fn(&Encoding) -> &[u32]| -> Vec<u32> {
            let mut flat = Vec::with_capacity(batch * width);
            for encoding in &encodings {
                let values = select(encoding);
                flat.extend_from_slice(values);
                flat.extend(std::iter::repeat_n(0u32, width - values.len()));
            }
            flat
        };

        let to_tensor = |values: Vec<u32>| {
            Tensor::from_vec(values, (batch, width), &self.device).map_err(|e| infer_err("input", e))
        };
        let input_ids = to_tensor(padded(Encoding::get_ids))?;
        let type_ids = to_tensor(padded(Encoding::get_type_ids))?;
        let mask = to_tensor(padded(Encoding::get_attention_mask))?;

        let hidden = self
            .model
            .forward(&input_ids, &type_ids, Some(&mask))
            .and_then(|t| t.to_dtype(DType::F32))
            .map_err(|e| infer_err("forward", e))?;

        let pooled = mean_pool(&hidden, &mask).map_err(|e| infer_err("pooling", e))?;

        (0..batch)
            .map(|row| -> Result<Vec<f32>, EmbedderError> {
                let mut values: Vec<f32> = pooled
                    .get(row)
                    .and_then(|t| t.to_vec1())
                    .map_err(|e| infer_err("extract", e))?;
                l2_normalize(&mut values);
                Ok(values)
            })
            .collect()
    }
}

fn mean_pool(hidden: &Tensor, mask: &Tensor) -> candle_core::Result<Tensor> {
    let mask = mask.to_dtype(DType::F32)?;
    let summed = hidden.broadcast_mul(&mask.unsqueeze(2)?)?.sum(1)?;
    let counts = mask.sum(1)?.unsqueeze(1)?;
    summed.broadcast_div(&counts)
}

fn l2_normalize(v: &mut [f32]) {
    let norm = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if norm > 0.0 {
        v.iter_mut().for_each(|x| *x /= norm);
    }
}

fn load_err(stage: &str, e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::ModelLoadFailed(format!("{}: {}", stage, e))
}

fn infer_err(stage: &str, e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::InferenceFailed(format!("{}: {}", stage, e))
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode(vec![text.to_string()])
            .await?
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let owned = texts.iter().map(|t| t.to_string()).collect();
        Ok(self
            .encode(owned)
            .await?
            .into_iter()
            .map(Embedding::new)
            .collect())
    }
}
