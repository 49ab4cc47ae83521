//! Dependency initialization and wiring for the API server.

use std::sync::Arc;

use anyhow::{Context, Result};
use esoteric_graph::{GraphService, Neo4jConnectionConfig, Neo4jProvider};
use esoteric_repository::postgres::{connect, run_migrations};
use esoteric_repository::{
    PostgresChartRepository, PostgresReadingRepository, PostgresUserRepository,
};
use tracing::{info, warn};

use super::ApiConfig;
use crate::server::state::AppState;

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// State shared by every request handler.
    pub state: AppState,
}

impl Dependencies {
    /// Connect to PostgreSQL, apply migrations and, when configured, connect
    /// to Neo4j.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Initialized dependencies
    /// * `Err(_)` - If PostgreSQL is unreachable or a migration fails
    pub async fn new(config: &ApiConfig) -> Result<Self> {
        info!(
            max_connections = config.database_max_connections,
            neo4j_configured = config.neo4j.is_some(),
            auth_header = %config.auth_header,
            "Initializing dependencies"
        );

        let pool = connect(&config.database_url, config.database_max_connections)
            .await
            .context("Failed to connect to PostgreSQL")?;
        run_migrations(&pool)
            .await
            .context("Failed to run database migrations")?;
        info!("PostgreSQL initialized successfully");

        let graph = Self::initialize_graph(config.neo4j.as_ref()).await;

        let state = AppState {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            readings: Arc::new(PostgresReadingRepository::new(pool.clone())),
            charts: Arc::new(PostgresChartRepository::new(pool)),
            graph: Arc::new(graph),
            auth_header: config.auth_header.clone(),
        };

        Ok(Self { state })
    }

    /// The graph is optional; any failure leaves the service disconnected.
    async fn initialize_graph(config: Option<&Neo4jConnectionConfig>) -> GraphService {
        let Some(config) = config else {
            info!("Neo4j not configured, graph exploration disabled");
            return GraphService::disconnected();
        };

        match Neo4jProvider::connect(config).await {
            Ok(provider) => {
                info!(uri = %config.uri, "Neo4j initialized successfully");
                GraphService::new(Arc::new(provider))
            }
            Err(e) => {
                warn!(uri = %config.uri, error = %e, "Failed to connect to Neo4j");
                warn!("Continuing without graph exploration");
                GraphService::disconnected()
            }
        }
    }
}
