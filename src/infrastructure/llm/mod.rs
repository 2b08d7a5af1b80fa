mod chat_completions_client;
pub mod embedder;

pub use chat_completions_client::ChatCompletionsClient;
pub use embedder::{
    EmbedderFactory, EmbedderFactoryError, HuggingFaceEmbedder, LocalCandleEmbedder,
};
