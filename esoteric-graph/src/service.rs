//! Graph service implementation.
//!
//! `GraphService` validates requests, builds Cypher through [`crate::query`]
//! and shapes provider rows into the shared result types. A service without a
//! provider answers every call with [`GraphError::NotConnected`].

use std::sync::Arc;

use esoteric_shared::{
    GraphNode, GraphPath, GraphStats, NodeDetail, PathResult, PatternQuery, PatternSearchResult,
    RelatedNode,
};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::config::GraphServiceConfig;
use crate::errors::GraphError;
use crate::interfaces::{GraphProvider, GraphRow};
use crate::query::{self, CypherQuery};

#[derive(Deserialize)]
struct NodeRow {
    node: Map<String, Value>,
    labels: Vec<String>,
}

#[derive(Deserialize)]
struct PathRow {
    nodes: Vec<GraphNode>,
    relationships: Vec<String>,
}

/// The API application code uses to explore the graph.
pub struct GraphService {
    provider: Option<Arc<dyn GraphProvider>>,
    config: GraphServiceConfig,
}

impl GraphService {
    /// Create a service with default limits.
    pub fn new(provider: Arc<dyn GraphProvider>) -> Self {
        Self::with_config(provider, GraphServiceConfig::default())
    }

    pub fn with_config(provider: Arc<dyn GraphProvider>, config: GraphServiceConfig) -> Self {
        Self {
            provider: Some(provider),
            config,
        }
    }

    /// A service with no backing database.
    pub fn disconnected() -> Self {
        Self {
            provider: None,
            config: GraphServiceConfig::default(),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.provider.is_some()
    }

    fn provider(&self) -> Result<&Arc<dyn GraphProvider>, GraphError> {
        self.provider.as_ref().ok_or(GraphError::NotConnected)
    }

    async fn fetch(&self, query: &CypherQuery) -> Result<Vec<GraphRow>, GraphError> {
        self.provider()?.fetch_rows(query).await
    }

    /// Find a node by display key, with up to `related_nodes_limit` neighbours.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(NodeDetail))` - The node and its neighbourhood
    /// * `Ok(None)` - No node has this name, label or title
    pub async fn get_node(&self, name: &str) -> Result<Option<NodeDetail>, GraphError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(GraphError::validation("node name is required"));
        }

        let rows = self.fetch(&query::node_lookup(name)).await?;
        let Some(row) = rows.into_iter().next() else {
            debug!(name, "Node not found");
            return Ok(None);
        };
        let NodeRow { node, labels } = decode_row(row)?;

        let related_rows = self
            .fetch(&query::related_nodes(name, self.config.related_nodes_limit))
            .await?;
        let related_nodes = related_rows
            .into_iter()
            .map(decode_row::<RelatedNode>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Some(NodeDetail {
            node,
            labels,
            related_nodes,
        }))
    }

    /// Shortest path between two display keys.
    ///
    /// `max_length` defaults to `default_path_length` and must be between 1
    /// and `max_path_length`.
    pub async fn find_path(
        &self,
        from: &str,
        to: &str,
        max_length: Option<u32>,
    ) -> Result<PathResult, GraphError> {
        let (from, to) = (from.trim(), to.trim());
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::validation(
                "Both 'from' and 'to' parameters are required",
            ));
        }

        let max_length = max_length.unwrap_or(self.config.default_path_length);
        if max_length == 0 || max_length > self.config.max_path_length {
            return Err(GraphError::validation(format!(
                "maxLength must be between 1 and {}",
                self.config.max_path_length
            )));
        }

        let rows = self
            .fetch(&query::shortest_path(from, to, max_length))
            .await?;
        match rows.into_iter().next() {
            Some(row) => {
                let PathRow {
                    nodes,
                    relationships,
                } = decode_row(row)?;
                info!(from, to, length = relationships.len(), "Path found");
                Ok(PathResult::Found {
                    path: GraphPath::new(nodes, relationships),
                })
            }
            None => Ok(PathResult::not_found(from, to)),
        }
    }

    /// Run a dynamic pattern search.
    ///
    /// The limit defaults to `default_search_limit` and is capped at
    /// `max_search_limit`. The executed Cypher is returned with the nodes.
    pub async fn search_pattern(
        &self,
        pattern: &PatternQuery,
    ) -> Result<PatternSearchResult, GraphError> {
        let limit = match pattern.limit {
            Some(0) => return Err(GraphError::validation("limit must be at least 1")),
            Some(limit) => limit.min(self.config.max_search_limit),
            None => self.config.default_search_limit,
        };

        let query = query::pattern_search(pattern, limit)?;
        let rows = self.fetch(&query).await?;
        let nodes = rows
            .into_iter()
            .map(decode_row::<GraphNode>)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(PatternSearchResult {
            nodes,
            query: query.text,
        })
    }

    /// Node and relationship counts plus the label and type vocabularies.
    pub async fn graph_stats(&self) -> Result<GraphStats, GraphError> {
        let node_count = self.fetch_scalar(&query::node_count()).await?;
        let relationship_count = self.fetch_scalar(&query::relationship_count()).await?;
        let labels = self.fetch_scalar(&query::labels()).await?;
        let relationship_types = self.fetch_scalar(&query::relationship_types()).await?;

        Ok(GraphStats {
            node_count,
            relationship_count,
            labels,
            relationship_types,
        })
    }

    /// The single column of the single row an aggregate query returns.
    async fn fetch_scalar<T: DeserializeOwned>(&self, query: &CypherQuery) -> Result<T, GraphError> {
        let column = *query
            .columns
            .first()
            .ok_or_else(|| GraphError::decode("aggregate query has no columns"))?;
        let mut row = self
            .fetch(query)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| GraphError::decode(format!("no row returned for '{}'", column)))?;
        let value = row
            .remove(column)
            .ok_or_else(|| GraphError::decode(format!("missing column '{}'", column)))?;
        serde_json::from_value(value).map_err(|e| GraphError::decode(e.to_string()))
    }
}

fn decode_row<T: DeserializeOwned>(row: GraphRow) -> Result<T, GraphError> {
    serde_json::from_value(Value::Object(row)).map_err(|e| GraphError::decode(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::json;
    use tokio::sync::Mutex;

    /// Answers queries from a script, in order, and records what was asked.
    struct MockProvider {
        responses: Mutex<Vec<Vec<GraphRow>>>,
        queries: Mutex<Vec<CypherQuery>>,
        should_fail: bool,
    }

    impl MockProvider {
        fn new(responses: Vec<Vec<Value>>) -> Self {
            let responses = responses
                .into_iter()
                .map(|rows| {
                    rows.into_iter()
                        .map(|row| match row {
                            Value::Object(map) => map,
                            other => panic!("row must be an object, got {}", other),
                        })
                        .collect()
                })
                .rev()
                .collect();
            Self {
                responses: Mutex::new(responses),
                queries: Mutex::new(Vec::new()),
                should_fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                should_fail: true,
                ..Self::new(vec![])
            }
        }
    }

    #[async_trait]
    impl GraphProvider for MockProvider {
        async fn fetch_rows(&self, query: &CypherQuery) -> Result<Vec<GraphRow>, GraphError> {
            if self.should_fail {
                return Err(GraphError::query("Mock failure"));
            }
            self.queries.lock().await.push(query.clone());
            Ok(self.responses.lock().await.pop().unwrap_or_default())
        }
    }

    fn service(provider: &Arc<MockProvider>) -> GraphService {
        GraphService::new(provider.clone())
    }

    #[tokio::test]
    async fn test_disconnected_service() {
        let service = GraphService::disconnected();
        assert!(!service.is_connected());
        assert!(matches!(
            service.get_node("The Fool").await,
            Err(GraphError::NotConnected)
        ));
        assert!(matches!(
            service.graph_stats().await,
            Err(GraphError::NotConnected)
        ));
    }

    #[tokio::test]
    async fn test_get_node_with_related() {
        let provider = Arc::new(MockProvider::new(vec![
            vec![json!({"node": {"name": "The Moon", "number": 18}, "labels": ["Card", "MajorArcana"]})],
            vec![
                json!({"node": {"name": "Pisces"}, "relationship": "RULED_BY", "labels": ["Sign"]}),
                json!({"node": {"name": "Qoph"}, "relationship": "HEBREW_LETTER", "labels": ["Letter"]}),
            ],
        ]));

        let detail = service(&provider)
            .get_node("The Moon")
            .await
            .unwrap()
            .unwrap();

        assert_eq!(detail.node["number"], json!(18));
        assert_eq!(detail.labels, vec!["Card", "MajorArcana"]);
        assert_eq!(detail.related_nodes.len(), 2);
        assert_eq!(detail.related_nodes[0].relationship, "RULED_BY");

        let queries = provider.queries.lock().await;
        assert_eq!(queries.len(), 2);
        assert!(queries[1].text.ends_with("LIMIT 20"));
    }

    #[tokio::test]
    async fn test_get_node_missing_skips_related_query() {
        let provider = Arc::new(MockProvider::new(vec![vec![]]));
        let result = service(&provider).get_node("Nothing").await.unwrap();

        assert!(result.is_none());
        assert_eq!(provider.queries.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_find_path_found() {
        let provider = Arc::new(MockProvider::new(vec![vec![json!({
            "nodes": [
                {"properties": {"name": "The Moon"}, "labels": ["Card"]},
                {"properties": {"name": "Pisces"}, "labels": ["Sign"]}
            ],
            "relationships": ["RULED_BY"]
        })]]));

        let result = service(&provider)
            .find_path("The Moon", "Pisces", None)
            .await
            .unwrap();

        match result {
            PathResult::Found { path } => {
                assert_eq!(path.length, 1);
                assert_eq!(path.nodes[1].properties["name"], json!("Pisces"));
            }
            other => panic!("expected a path, got {:?}", other),
        }
        assert!(provider.queries.lock().await[0].text.contains("[*..5]"));
    }

    #[tokio::test]
    async fn test_find_path_not_found() {
        let provider = Arc::new(MockProvider::new(vec![vec![]]));
        let result = service(&provider)
            .find_path("Aries", "The Hermit", Some(3))
            .await
            .unwrap();

        assert_eq!(result, PathResult::not_found("Aries", "The Hermit"));
    }

    #[tokio::test]
    async fn test_find_path_validation() {
        let provider = Arc::new(MockProvider::new(vec![]));
        let service = service(&provider);

        assert!(service.find_path("", "Pisces", None).await.is_err());
        assert!(service.find_path("Aries", "Pisces", Some(0)).await.is_err());
        assert!(service.find_path("Aries", "Pisces", Some(16)).await.is_err());
        assert!(provider.queries.lock().await.is_empty());
    }

    #[tokio::test]
    async fn test_search_pattern_limits() {
        let provider = Arc::new(MockProvider::new(vec![
            vec![json!({"properties": {"name": "Two of Cups"}, "labels": ["Card"]})],
            vec![],
        ]));
        let service = service(&provider);

        let result = service
            .search_pattern(&PatternQuery {
                node_type: Some("Card".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(result.nodes.len(), 1);
        assert!(result.query.ends_with("LIMIT 50"));

        let result = service
            .search_pattern(&PatternQuery {
                limit: Some(10_000),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(result.query.ends_with("LIMIT 500"));

        assert!(service
            .search_pattern(&PatternQuery {
                limit: Some(0),
                ..Default::default()
            })
            .await
            .is_err());
    }

    #[tokio::test]
    async fn test_graph_stats() {
        let provider = Arc::new(MockProvider::new(vec![
            vec![json!({"nodeCount": 156})],
            vec![json!({"relationshipCount": 410})],
            vec![json!({"labels": ["Card", "Sign", "Planet"]})],
            vec![json!({"relationshipTypes": ["RULED_BY"]})],
        ]));

        let stats = service(&provider).graph_stats().await.unwrap();
        assert_eq!(stats.node_count, 156);
        assert_eq!(stats.relationship_count, 410);
        assert_eq!(stats.labels.len(), 3);
        assert_eq!(stats.relationship_types, vec!["RULED_BY"]);
    }

    #[tokio::test]
    async fn test_provider_failure_propagates() {
        let provider = Arc::new(MockProvider::failing());
        let result = service(&provider).get_node("The Sun").await;
        assert!(matches!(result, Err(GraphError::QueryError(_))));
    }

    #[tokio::test]
    async fn test_malformed_row_is_decode_error() {
        let provider = Arc::new(MockProvider::new(vec![vec![json!({"node": "not a map", "labels": []})]]));
        let result = service(&provider).get_node("The Sun").await;
        assert!(matches!(result, Err(GraphError::DecodeError(_))));
    }
}
