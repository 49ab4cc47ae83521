// HTTP request handlers
pub mod auth;
pub mod charts;
pub mod ephemeris;
pub mod graph;
pub mod health;
pub mod readings;

use axum::extract::{FromRequest, FromRequestParts};
use uuid::Uuid;

use crate::errors::ApiError;

/// JSON body whose rejections use the API error format.
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

/// Query string extractor with JSON rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Query), rejection(ApiError))]
pub struct ApiQuery<T>(pub T);

/// Path parameter extractor with JSON rejections.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiError))]
pub struct ApiPath<T>(pub T);

/// Ids that do not parse cannot name an existing row.
fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::not_found(not_found))
}
