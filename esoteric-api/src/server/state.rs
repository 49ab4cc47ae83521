// App state for Axum server
use std::sync::Arc;

use axum::http::HeaderName;
use esoteric_graph::GraphService;
use esoteric_repository::{ChartRepository, ReadingRepository, UserRepository};

#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub readings: Arc<dyn ReadingRepository>,
    pub charts: Arc<dyn ChartRepository>,
    pub graph: Arc<GraphService>,
    /// Header carrying the authenticated subject.
    pub auth_header: HeaderName,
}
