#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use sitechat::application::ports::{
    ContentFetcher, ContentFetcherError, Embedder, EmbedderError, LlmClient, LlmClientError,
    PageContent, SessionStore,
};
use sitechat::application::services::{
    ConversationService, InteractionService, RetrievalIndexBuilder, SummarizationService,
};
use sitechat::domain::{ChatMessage, Embedding, LlmModel, WebUrl};
use sitechat::infrastructure::persistence::{InMemorySessionStore, InMemoryVectorStore};
use sitechat::infrastructure::text_processing::RecursiveCharacterSplitter;

pub const TEST_CHUNK_SIZE: usize = 700;
pub const TEST_CHUNK_OVERLAP: usize = 100;
pub const TEST_TOP_K: usize = 5;
pub const MOCK_ANSWER: &str = "Mock answer";
pub const PAGE_TEXT: &str = "Rust is a systems programming language focused on safety.\n\n\
Ferris the crab is the unofficial mascot of the Rust community.\n\n\
Cargo is the Rust package manager and build tool.";

pub struct MockContentFetcher {
    text: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockContentFetcher {
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl ContentFetcher for MockContentFetcher {
    async fn fetch(&self, url: &WebUrl) -> Result<PageContent, ContentFetcherError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(ContentFetcherError::HttpStatus {
                status: 404,
                url: url.to_string(),
            });
        }
        Ok(PageContent {
            title: Some("Test page".to_string()),
            text: self.text.clone(),
        })
    }
}

/// Replies from a queue, falling back to [`MOCK_ANSWER`] once it runs dry.
/// Every request's messages are recorded for inspection.
pub struct ScriptedLlmClient {
    replies: Mutex<VecDeque<Result<String, LlmClientError>>>,
    requests: Mutex<Vec<(LlmModel, Vec<ChatMessage>)>>,
    has_credentials: bool,
}

impl ScriptedLlmClient {
    pub fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            requests: Mutex::new(Vec::new()),
            has_credentials: true,
        }
    }

    pub fn without_credentials() -> Self {
        Self {
            has_credentials: false,
            ..Self::new()
        }
    }

    pub fn reply(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push_back(Ok(text.to_string()));
        self
    }

    pub fn fail_with(self, error: LlmClientError) -> Self {
        self.replies.lock().unwrap().push_back(Err(error));
        self
    }

    pub fn requests(&self) -> Vec<(LlmModel, Vec<ChatMessage>)> {
        self.requests.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedLlmClient {
    async fn complete(
        &self,
        model: LlmModel,
        messages: &[ChatMessage],
    ) -> Result<String, LlmClientError> {
        self.requests
            .lock()
            .unwrap()
            .push((model, messages.to_vec()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok(MOCK_ANSWER.to_string()))
    }

    fn has_credentials(&self) -> bool {
        self.has_credentials
    }
}

const BAG_DIMENSIONS: usize = 16;

/// Hashes lowercase words into a fixed number of buckets, so texts sharing
/// words score higher under cosine similarity.
pub struct BagOfWordsEmbedder;

impl BagOfWordsEmbedder {
    fn vectorize(text: &str) -> Embedding {
        let mut values = vec![0.0_f32; BAG_DIMENSIONS];
        for word in text.split(|c: char| !c.is_alphanumeric()) {
            if word.is_empty() {
                continue;
            }
            let bucket = word
                .to_lowercase()
                .bytes()
                .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize))
                % BAG_DIMENSIONS;
            values[bucket] += 1.0;
        }
        Embedding::new(values)
    }
}

#[async_trait::async_trait]
impl Embedder for BagOfWordsEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        Ok(Self::vectorize(text))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Ok(texts.iter().map(|t| Self::vectorize(t)).collect())
    }
}

pub struct FailingEmbedder;

#[async_trait::async_trait]
impl Embedder for FailingEmbedder {
    async fn embed(&self, _text: &str) -> Result<Embedding, EmbedderError> {
        Err(EmbedderError::MissingApiKey)
    }

    async fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        Err(EmbedderError::MissingApiKey)
    }
}

pub fn index_builder(embedder: Arc<dyn Embedder>) -> RetrievalIndexBuilder<InMemoryVectorStore> {
    RetrievalIndexBuilder::new(
        embedder,
        Arc::new(RecursiveCharacterSplitter::new(
            TEST_CHUNK_SIZE,
            TEST_CHUNK_OVERLAP,
        )),
    )
}

pub struct TestHarness {
    pub fetcher: Arc<MockContentFetcher>,
    pub llm: Arc<ScriptedLlmClient>,
    pub store: Arc<InMemorySessionStore>,
    pub interaction_service:
        Arc<InteractionService<MockContentFetcher, ScriptedLlmClient, InMemoryVectorStore>>,
}

impl TestHarness {
    pub fn new(fetcher: MockContentFetcher, llm: ScriptedLlmClient) -> Self {
        Self::with_embedder(fetcher, llm, Arc::new(BagOfWordsEmbedder))
    }

    pub fn with_embedder(
        fetcher: MockContentFetcher,
        llm: ScriptedLlmClient,
        embedder: Arc<dyn Embedder>,
    ) -> Self {
        let fetcher = Arc::new(fetcher);
        let llm = Arc::new(llm);
        let store = Arc::new(InMemorySessionStore::new());
        let session_store: Arc<dyn SessionStore> = store.clone();

        let summarization_service = SummarizationService::new(
            Arc::clone(&fetcher),
            Arc::clone(&llm),
            Arc::clone(&session_store),
        );
        let conversation_service = ConversationService::new(
            Arc::clone(&llm),
            index_builder(embedder),
            Arc::clone(&session_store),
            TEST_TOP_K,
        );
        let interaction_service = Arc::new(InteractionService::new(
            summarization_service,
            conversation_service,
            session_store,
            LlmModel::default(),
        ));

        Self {
            fetcher,
            llm,
            store,
            interaction_service,
        }
    }
}
