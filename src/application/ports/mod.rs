mod content_fetcher;
mod embedder;
mod llm_client;
mod repository_error;
mod search_result;
mod session_store;
mod text_splitter;
mod vector_store;
mod vector_store_error;

pub use content_fetcher::{ContentFetcher, ContentFetcherError, PageContent};
pub use embedder::{Embedder, EmbedderError};
pub use llm_client::{LlmClient, LlmClientError};
pub use repository_error::RepositoryError;
pub use search_result::SearchResult;
pub use session_store::SessionStore;
pub use text_splitter::{TextSplitter, TextSplitterError};
pub use vector_store::VectorStore;
pub use vector_store_error::VectorStoreError;
