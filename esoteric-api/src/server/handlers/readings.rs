use axum::{
    extract::State,
    Json,
};
use esoteric_shared::{NewReading, PrivacyUpdate, Reading};
use serde_json::{json, Value};
use tracing::info;

use super::{parse_id, ApiJson, ApiPath};
use crate::auth::AuthenticatedUser;
use crate::errors::ApiError;
use crate::server::state::AppState;

const NOT_FOUND: &str = "Reading not found";

pub async fn list_readings(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<Vec<Reading>>, ApiError> {
    let readings = state
        .readings
        .list_readings(&user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch readings", e))?;
    Ok(Json(readings))
}

pub async fn get_reading(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Reading>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    state
        .readings
        .get_reading(id, &user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch reading", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn create_reading(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(reading): ApiJson<NewReading>,
) -> Result<Json<Reading>, ApiError> {
    reading.validate()?;

    let created = state
        .readings
        .create_reading(&user.id, &reading)
        .await
        .map_err(|e| ApiError::internal("Failed to create reading", e))?;

    info!(
        user_id = %user.id,
        reading_id = %created.id,
        spread_type = %created.spread_type,
        cards = created.positions.len(),
        "Reading created"
    );
    Ok(Json(created))
}

pub async fn update_privacy(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
    ApiJson(update): ApiJson<PrivacyUpdate>,
) -> Result<Json<Reading>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    state
        .readings
        .update_reading_privacy(id, &user.id, update.is_private)
        .await
        .map_err(|e| ApiError::internal("Failed to update reading privacy", e))?
        .map(Json)
        .ok_or_else(|| ApiError::not_found(NOT_FOUND))
}

pub async fn delete_reading(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiPath(id): ApiPath<String>,
) -> Result<Json<Value>, ApiError> {
    let id = parse_id(&id, NOT_FOUND)?;
    let deleted = state
        .readings
        .delete_reading(id, &user.id)
        .await
        .map_err(|e| ApiError::internal("Failed to delete reading", e))?;

    if !deleted {
        return Err(ApiError::not_found(NOT_FOUND));
    }
    info!(user_id = %user.id, reading_id = %id, "Reading deleted");
    Ok(Json(json!({ "success": true })))
}
