use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;

use sitechat::application::ports::SessionStore;
use sitechat::application::services::{
    ConversationService, InteractionService, RetrievalIndexBuilder, SummarizationService,
};
use sitechat::infrastructure::llm::{ChatCompletionsClient, EmbedderFactory};
use sitechat::infrastructure::observability::{TracingConfig, init_tracing};
use sitechat::infrastructure::persistence::{InMemorySessionStore, InMemoryVectorStore};
use sitechat::infrastructure::text_processing::RecursiveCharacterSplitter;
use sitechat::infrastructure::web::HttpContentFetcher;
use sitechat::presentation::{AppState, Environment, Settings, create_router};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::try_from(
        std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "local".to_string()),
    )
    .map_err(anyhow::Error::msg)?;

    let settings = Settings::load(environment).context("Failed to load settings")?;
    init_tracing(&TracingConfig::new(environment, &settings.logging));

    let default_model = settings.default_model().map_err(anyhow::Error::msg)?;
    if settings.llm.api_key.trim().is_empty() {
        tracing::warn!("GROQ_API_KEY is not set; requests will be rejected until it is configured");
    }

    let content_fetcher = Arc::new(HttpContentFetcher::new(&settings.fetcher)?);
    let llm_client = Arc::new(ChatCompletionsClient::new(&settings.llm)?);
    let embedder = EmbedderFactory::create(&settings.embeddings)?;
    let text_splitter = Arc::new(RecursiveCharacterSplitter::new(
        settings.rag.chunk_size,
        settings.rag.chunk_overlap,
    ));
    let session_store: Arc<dyn SessionStore> = Arc::new(InMemorySessionStore::new());

    let summarization_service = SummarizationService::new(
        Arc::clone(&content_fetcher),
        Arc::clone(&llm_client),
        Arc::clone(&session_store),
    );
    let conversation_service = ConversationService::new(
        Arc::clone(&llm_client),
        RetrievalIndexBuilder::<InMemoryVectorStore>::new(embedder, text_splitter),
        Arc::clone(&session_store),
        settings.rag.top_k,
    );

    let state = AppState {
        interaction_service: Arc::new(InteractionService::new(
            summarization_service,
            conversation_service,
            session_store,
            default_model,
        )),
    };

    let router = create_router(state);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!(%addr, model = %default_model, "Listening");

    axum::serve(listener, router).await?;

    Ok(())
}
