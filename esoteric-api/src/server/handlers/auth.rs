use axum::{extract::State, Json};
use esoteric_shared::{BirthDataUpdate, User};
use tracing::info;

use super::ApiJson;
use crate::auth::AuthenticatedUser;
use crate::errors::ApiError;
use crate::server::state::AppState;

/// The signed-in user. The extractor has already stored the claims.
pub async fn current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<User>, ApiError> {
    stored_user(&state, &user.id).await.map(Json)
}

async fn stored_user(state: &AppState, id: &str) -> Result<User, ApiError> {
    state
        .users
        .get_user(id)
        .await
        .map_err(|e| ApiError::internal("Failed to fetch user", e))?
        .ok_or_else(|| ApiError::not_found("User not found"))
}

/// Update the birth data used for natal charts.
pub async fn update_birth_data(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiJson(update): ApiJson<BirthDataUpdate>,
) -> Result<Json<User>, ApiError> {
    update.validate()?;
    if update.is_empty() {
        return stored_user(&state, &user.id).await.map(Json);
    }

    let updated = state
        .users
        .update_birth_data(&user.id, &update)
        .await
        .map_err(|e| ApiError::internal("Failed to update birth data", e))?
        .ok_or_else(|| ApiError::not_found("User not found"))?;

    info!(user_id = %user.id, "Birth data updated");
    Ok(Json(updated))
}
