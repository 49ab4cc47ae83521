// Neo4j connection setup
use neo4rs::{Graph, Query};
use tracing::info;

use crate::errors::GraphError;

/// Credentials for a Bolt endpoint.
#[derive(Clone)]
pub struct Neo4jConnectionConfig {
    pub uri: String,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Neo4jConnectionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Neo4jConnectionConfig")
            .field("uri", &self.uri)
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Connect to Neo4j and verify the server answers a trivial query.
pub async fn connect(config: &Neo4jConnectionConfig) -> Result<Graph, GraphError> {
    info!(uri = %config.uri, "Connecting to Neo4j");

    let graph = Graph::new(&config.uri, &config.username, &config.password)
        .map_err(|e| GraphError::connection(format!("Failed to connect to Neo4j: {}", e)))?;

    graph
        .run(Query::new("RETURN 1".to_string()))
        .await
        .map_err(|e| GraphError::connection(format!("Neo4j connectivity check failed: {}", e)))?;

    info!("✓ Connected to Neo4j");
    Ok(graph)
}
