//! HTTP gateway (Axum) over the retrieval engine.
//!
//! This module is primarily used by the `lodestar` server binary. It adds no
//! semantics of its own: `/search` and `/suggest` mirror
//! [`RetrievalEngine::search_and_rank`] and
//! [`RetrievalEngine::get_suggestions`].
//!
//! [`RetrievalEngine::search_and_rank`]: crate::engine::RetrievalEngine::search_and_rank
//! [`RetrievalEngine::get_suggestions`]: crate::engine::RetrievalEngine::get_suggestions

pub mod error;
pub mod handler;
pub mod state;


use axum::{
    Json, Router,
    routing::get,
};
use tower_http::trace::TraceLayer;

pub use error::GatewayError;
pub use handler::{SearchParams, SearchResponse, SuggestResponse, search_handler, suggest_handler};
pub use state::HandlerState;

use crate::provider::SearchProvider;
use crate::suggest::SuggestionSource;

/// Response header carrying the retrieval status of a `/search` call.
pub const STATUS_HEADER: &str = "x-lodestar-status";

pub fn create_router_with_state<P, S>(state: HandlerState<P, S>) -> Router
where
    P: SearchProvider + 'static,
    S: SuggestionSource + 'static,
{
    Router::new()
        .route("/healthz", get(health_handler))
        .route("/ready", get(ready_handler::<P, S>))
        .route("/search", get(search_handler::<P, S>))
        .route("/suggest", get(suggest_handler::<P, S>))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[derive(serde::Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

#[derive(serde::Serialize)]
pub struct ReadyResponse {
    pub status: &'static str,
    pub components: ComponentStatus,
}

#[derive(serde::Serialize)]
pub struct ComponentStatus {
    pub http: &'static str,
    pub encoder: &'static str,
    pub encoder_mode: &'static str,
    pub filter_terms: usize,
}

#[tracing::instrument]
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

pub async fn ready_handler<P, S>(
    axum::extract::State(state): axum::extract::State<HandlerState<P, S>>,
) -> Json<ReadyResponse>
where
    P: SearchProvider + 'static,
    S: SuggestionSource + 'static,
{
    let context = state.engine.context();

    Json(ReadyResponse {
        status: "ready",
        components: ComponentStatus {
            http: "ok",
            encoder: "ok",
            encoder_mode: if context.encoder().is_stub() {
                "stub"
            } else {
                "model"
            },
            filter_terms: context.filter().term_count(),
        },
    })
}
