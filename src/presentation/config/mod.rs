mod environment;
mod settings;

pub use environment::Environment;
pub use settings::{
    DEFAULT_EMBEDDING_MODEL, DEFAULT_LLM_BASE_URL, DEFAULT_USER_AGENT, EmbeddingProvider,
    EmbeddingsSettings, FetcherSettings, LlmSettings, LoggingSettings, RagSettings,
    ServerSettings, Settings,
};
