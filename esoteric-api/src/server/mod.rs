// Server module - HTTP server setup and routing
pub mod handlers;
pub mod state;

use std::net::SocketAddr;

use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use self::handlers::{auth, charts, ephemeris, graph, health, readings};
use self::state::AppState;

/// Create the Axum application router with all routes and middleware
pub fn create_app(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/api/auth/user", get(auth::current_user))
        .route("/api/auth/user/birth-data", patch(auth::update_birth_data))
        .route(
            "/api/readings",
            get(readings::list_readings).post(readings::create_reading),
        )
        .route(
            "/api/readings/:id",
            get(readings::get_reading).delete(readings::delete_reading),
        )
        .route("/api/readings/:id/privacy", patch(readings::update_privacy))
        .route(
            "/api/charts",
            get(charts::list_charts).post(charts::create_chart),
        )
        .route(
            "/api/charts/:id",
            get(charts::get_chart).delete(charts::delete_chart),
        )
        .route("/api/charts/:id/privacy", patch(charts::update_privacy))
        .route("/api/graph/node/:name", get(graph::get_node))
        .route("/api/graph/path", get(graph::find_path))
        .route("/api/graph/search", post(graph::search_pattern))
        .route("/api/graph/stats", get(graph::graph_stats))
        .route("/api/ephemeris/natal-chart", post(ephemeris::natal_chart))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Run the server on the specified address until Ctrl-C
pub async fn run_server(app: Router, addr: SocketAddr) -> anyhow::Result<()> {
    info!("Server listening on {}", addr);
    info!("- Health endpoint: http://{}/health", addr);
    info!("- API base: http://{}/api", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!(error = %e, "Failed to listen for shutdown signal"),
    }
}
