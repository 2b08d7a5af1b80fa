use axum::Router;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{ContentFetcher, LlmClient, VectorStore};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    ask_handler, get_session_handler, health_handler, models_handler, summarize_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<F, L, V>(state: AppState<F, L, V>) -> Router
where
    F: ContentFetcher + 'static,
    L: LlmClient + 'static,
    V: VectorStore + Default + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/v1/models", get(models_handler::<F, L, V>))
        .route(
            "/api/v1/sessions/{session_id}",
            get(get_session_handler::<F, L, V>),
        )
        .route(
            "/api/v1/sessions/{session_id}/summarize",
            post(summarize_handler::<F, L, V>),
        )
        .route(
            "/api/v1/sessions/{session_id}/ask",
            post(ask_handler::<F, L, V>),
        )
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
