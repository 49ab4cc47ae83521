use axum::{
    extract::State,
    Json,
};
use esoteric_shared::{Chart, NewChart, PrivacyUpdate};
use serde_json::{json, Value};
use tracing::info;

use super::{parse_id, ApiJson, ApiPath};
use crate::auth::AuthenticatedUser;
use crate::errors::ApiError;
use crate::server::state::AppState;

const NOT_FOUND: &str = "Chart not found";

pub async fn list_charts(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Chart>>, ApiError> {
    let charts = state
        .charts
        .list_charts(&user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch charts", e))?;
    Ok(Json(charts))
}

pub async fn get_chart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Chart>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    state
        .charts
        .get_chart(id, &user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch chart", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn create_chart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(chart): ApiJson<NewChart>,
) -> Result<Json<Chart>, ApiError> {
    chart.validate()?;

    let created = state
        .charts
        .create_chart(&user.id, &chart)
        .await
        .map_err(|e| ApiError::internal("Failed to create chart", e))?;

    info!(
        user_id = %user.id,
        chart_id = %created.id,
        chart_type = %created.chart_type,
        "Chart created"
    );
    Ok(Json(created))
}

pub async fn update_privacy(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<PrivacyUpdate>,
) -> Result<Json<Chart>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    state
        .charts
        .update_chart_privacy(id, &user.id, update.is_private)
        .await
        .map_err(|e| ApiError::internal("Failed to update chart privacy", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn delete_chart(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let deleted = state
        .charts
        .delete_chart(id, &user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete chart", e))?;

    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(user_id = %user.id, chart_id = %id, "Chart deleted");
    Ok(Json(json!({ "success": true })))
}
