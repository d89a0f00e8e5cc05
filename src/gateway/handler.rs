use axum::{
    Json,
    extract::{Query as QueryParams, State},
    http::{HeaderMap, HeaderValue},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::constants::DEFAULT_TOP_K;
use crate::engine::{RetrievalStatus, SearchOutcome};
use crate::provider::SearchProvider;
use crate::ranking::RankedResult;
use crate::suggest::{Suggestion, SuggestionSource};

use super::STATUS_HEADER;
use super::error::GatewayError;
use super::state::HandlerState;

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: String,
    pub k: Option<usize>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub status: RetrievalStatus,
    pub results: Vec<RankedResult>,
}

#[derive(Debug, Serialize)]
pub struct SuggestResponse {
    pub query: String,
    pub suggestions: Vec<Suggestion>,
}

fn validate_query(q: &str) -> Result<(), GatewayError> {
    if q.trim().is_empty() {
        return Err(GatewayError::InvalidRequest(
            "query parameter 'q' must not be blank".to_string(),
        ));
    }
    Ok(())
}

fn status_headers(status: RetrievalStatus) -> HeaderMap {
    let mut headers = HeaderMap::new();
    headers.insert(STATUS_HEADER, HeaderValue::from_static(status.as_str()));
    headers
}

#[instrument(skip(state, params), fields(k = params.k))]
pub async fn search_handler<P, S>(
    State(state): State<HandlerState<P, S>>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Response, GatewayError>
where
    P: SearchProvider + 'static,
    S: SuggestionSource + 'static,
{
    validate_query(&params.q)?;
    let k = params.k.unwrap_or(DEFAULT_TOP_K);

    let SearchOutcome { results, status } = state.engine.search_and_rank(&params.q, k).await;

    let body = SearchResponse {
        query: params.q,
        status,
        results,
    };

    Ok((status_headers(status), Json(body)).into_response())
}

#[instrument(skip(state, params), fields(k = params.k))]
pub async fn suggest_handler<P, S>(
    State(state): State<HandlerState<P, S>>,
    QueryParams(params): QueryParams<SearchParams>,
) -> Result<Response, GatewayError>
where
    P: SearchProvider + 'static,
    S: SuggestionSource + 'static,
{
    validate_query(&params.q)?;
    let k = params.k.unwrap_or(DEFAULT_TOP_K);

    let suggestions = state.engine.get_suggestions(&params.q, k).await;

    let body = SuggestResponse {
        query: params.q,
        suggestions,
    };

    Ok(Json(body).into_response())
}
