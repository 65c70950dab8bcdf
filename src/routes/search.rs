use crate::error::ProxyError;
use crate::models::responses::SearchResponse;
use crate::services::query::parse_query;
use crate::services::shaping::shape_results;
use crate::AppState;
use axum::{
    extract::{Query, State},
    response::Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub q: Option<String>,
}

pub async fn search_books(
    Query(params): Query<SearchParams>,
    State(state): State<Arc<AppState>>,
) -> Result<Json<SearchResponse>, ProxyError> {
    let raw_query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ProxyError::MissingQuery)?;

    let parsed = parse_query(&raw_query);
    info!(
        "Query '{}' -> filters {:?}, formats {:?}",
        raw_query,
        parsed.filters,
        parsed.target_codes()
    );

    let page = state
        .backend
        .search_books(&parsed.filters)
        .await
        .map_err(|e| {
            error!("Catalog search failed for '{}': {}", raw_query, e);
            e
        })?;
    let results = shape_results(page, &parsed.targets, state.config.search_result_limit);

    Ok(Json(SearchResponse {
        count: results.len(),
        filters_applied: parsed.filters,
        results,
    }))
}
