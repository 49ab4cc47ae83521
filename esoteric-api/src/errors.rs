//! Error responses for the HTTP API.
//!
//! Every failure is answered with a JSON body of the form
//! `{"message": "..."}`. Storage and graph failures are logged here, with the
//! underlying cause, and the client only sees the operation that failed.

use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use esoteric_graph::GraphError;
use esoteric_shared::ValidationError;
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum ApiError {
    /// No identity was presented.
    #[error("Unauthorized")]
    Unauthorized,

    /// The request body or parameters are invalid.
    #[error("{0}")]
    BadRequest(String),

    /// The resource does not exist or belongs to someone else.
    #[error("{0}")]
    NotFound(String),

    /// A backing service is not configured.
    #[error("{0}")]
    ServiceUnavailable(String),

    /// A backing service failed.
    #[error("{0}")]
    Internal(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Log `err` and answer with `context` only.
    pub fn internal(context: &str, err: impl std::fmt::Display) -> Self {
        error!(error = %err, "{}", context);
        Self::Internal(context.to_string())
    }

    /// Map a graph failure, keeping client mistakes and a missing database
    /// distinguishable from query failures.
    pub fn graph(context: &str, err: GraphError) -> Self {
        match err {
            GraphError::NotConnected => Self::ServiceUnavailable(err.to_string()),
            GraphError::ValidationError(msg) => Self::BadRequest(msg),
            other => Self::internal(context, other),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::BadRequest(err.reason().to_string())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "message": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_error_mapping() {
        let err = ApiError::graph("Failed to fetch node", GraphError::NotConnected);
        assert_eq!(err.status_code(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(
            err.to_string(),
            "Neo4j database not connected. Please configure Neo4j credentials."
        );

        let err = ApiError::graph(
            "Failed to search",
            GraphError::validation("nodeType 'Card)' must contain only letters"),
        );
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::graph("Failed to find path", GraphError::query("timeout"));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.to_string(), "Failed to find path");
    }

    #[test]
    fn test_validation_error_drops_prefix() {
        let err: ApiError = ValidationError::new("spreadType is required").into();
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.to_string(), "spreadType is required");
    }
}
