mod embedder_factory;
mod huggingface_embedder;
mod local_candle_embedder;

pub use embedder_factory::{EmbedderFactory, EmbedderFactoryError};
pub use huggingface_embedder::{HUGGINGFACE_INFERENCE_URL, HuggingFaceEmbedder};
pub use local_candle_embedder::LocalCandleEmbedder;
