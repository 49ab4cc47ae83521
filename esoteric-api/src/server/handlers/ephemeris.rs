use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use crate::auth::AuthenticatedUser;

/// Natal chart calculation. Answers with a placeholder until an ephemeris
/// backend is wired in.
pub async fn natal_chart(user: AuthenticatedUser) -> Json<Value> {
    info!(user_id = %user.id, "Natal chart requested");
    Json(json!({ "message": "Swiss Ephemeris integration coming soon" }))
}
