use axum::{
    extract::State,
    Json,
};
use esoteric_shared::{GraphStats, NodeDetail, PathResult, PatternQuery, PatternSearchResult};
use serde::Deserialize;
use tracing::debug;

use super::{ApiJson, ApiPath, ApiQuery};
use crate::errors::ApiError;
use crate::server::state::AppState;

/// Node lookup by display key. The name arrives URL-decoded.
pub async fn get_node(
    State(state): State<AppState>,
    ApiPath(name): ApiPath<String>,
) -> Result<Json<NodeDetail>, ApiError> {
    debug!(name = %name, "Node lookup");
    state
        .graph
        .get_node(&name)
        .await
        .map_err(|e| ApiError::graph("Failed to fetch node", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Node not found"))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PathParams {
    from: Option<String>,
    to: Option<String>,
    max_length: Option<String>,
}

pub async fn find_path(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PathParams>,
) -> Result<Json<PathResult>, ApiError> {
    let (Some(from), Some(to)) = (params.from, params.to) else {
        return Err(ApiError::bad_request(
            "Both 'from' and 'to' parameters are required",
        ));
    };

    let max_length = params
        .max_length
        .map(|raw| {
            raw.trim()
                .parse::<u32>()
                .map_err(|_| ApiError::bad_request("maxLength must be a positive integer"))
        })
        .transpose()?;

    let result = state
        .graph
        .find_path(&from, &to, max_length)
        .await
        .map_err(|e| ApiError::graph("Failed to find path", e))?;
    Ok(Json(result))
}

pub async fn search_pattern(
    State(state): State<AppState>,
    ApiJson(pattern): ApiJson<PatternQuery>,
) -> Result<Json<PatternSearchResult>, ApiError> {
    let result = state
        .graph
        .search_pattern(&pattern)
        .await
        .map_err(|e| ApiError::graph("Failed to search graph", e))?;
    Ok(Json(result))
}

pub async fn graph_stats(State(state): State<AppState>) -> Result<Json<GraphStats>, ApiError> {
    let stats = state
        .graph
        .graph_stats()
        .await
        .map_err(|e| ApiError::graph("Failed to fetch graph statistics", e))?;
    Ok(Json(stats))
}
