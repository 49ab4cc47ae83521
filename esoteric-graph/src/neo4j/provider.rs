//! `GraphProvider` backed by a `neo4rs::Graph`.
use async_trait::async_trait;
use neo4rs::{BoltType, Graph, Query};
use serde_json::Map;
use tracing::debug;

use super::connection::{connect, Neo4jConnectionConfig};
use super::convert::{bolt_to_json, json_to_bolt};
use crate::errors::GraphError;
use crate::interfaces::{GraphProvider, GraphRow};
use crate::query::CypherQuery;

/// Runs Cypher over a pooled Bolt connection.
pub struct Neo4jProvider {
    graph: Graph,
}

impl Neo4jProvider {
    pub fn new(graph: Graph) -> Self {
        Self { graph }
    }

    /// Connect using the given credentials.
    pub async fn connect(config: &Neo4jConnectionConfig) -> Result<Self, GraphError> {
        let graph = connect(config).await?;
        Ok(Self::new(graph))
    }
}

#[async_trait]
impl GraphProvider for Neo4jProvider {
    async fn fetch_rows(&self, cypher: &CypherQuery) -> Result<Vec<GraphRow>, GraphError> {
        debug!(query = %cypher.text, params = cypher.params.len(), "Running Cypher");

        let mut query = Query::new(cypher.text.clone());
        for (key, value) in &cypher.params {
            query = query.param(key.as_str(), json_to_bolt(value));
        }

        let mut stream = self.graph.execute(query).await?;
        let mut rows = Vec::new();
        while let Some(row) = stream.next().await? {
            let mut map = Map::new();
            for column in &cypher.columns {
                let value = row.get::<BoltType>(column).map_err(|e| {
                    GraphError::decode(format!("Failed to read column '{}': {}", column, e))
                })?;
                map.insert(column.to_string(), bolt_to_json(value));
            }
            rows.push(map);
        }

        Ok(rows)
    }
}
