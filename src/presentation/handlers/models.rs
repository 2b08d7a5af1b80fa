use axum::Json;
use axum::extract::State;
use axum::response::IntoResponse;
use serde::Serialize;

use crate::application::ports::{ContentFetcher, LlmClient, VectorStore};
use crate::domain::LlmModel;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct ModelsResponse {
    pub default: String,
    pub models: Vec<ModelEntry>,
}

#[derive(Serialize)]
pub struct ModelEntry {
    pub id: String,
    pub default: bool,
}

/// Selectable models, the configured default first.
pub async fn models_handler<F, L, V>(State(state): State<AppState<F, L, V>>) -> impl IntoResponse
where
    F: ContentFetcher + 'static,
    L: LlmClient + 'static,
    V: VectorStore + Default + 'static,
{
    let default = state.interaction_service.default_model();

    let mut models: Vec<ModelEntry> = LlmModel::ALL
        .into_iter()
        .map(|model| ModelEntry {
            id: model.as_str().to_string(),
            default: model == default,
        })
        .collect();
    models.sort_by_key(|m| !m.default);

    Json(ModelsResponse {
        default: default.as_str().to_string(),
        models,
    })
}
