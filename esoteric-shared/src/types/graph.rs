//! Result shapes for graph exploration.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A node with its properties and labels.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct GraphNode {
    pub properties: Map<String, Value>,
    pub labels: Vec<String>,
}

/// A neighbour of a looked-up node and the type of the connecting relationship.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelatedNode {
    pub node: Map<String, Value>,
    pub relationship: String,
    pub labels: Vec<String>,
}

/// A node found by its display key together with its neighbourhood.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NodeDetail {
    pub node: Map<String, Value>,
    pub labels: Vec<String>,
    pub related_nodes: Vec<RelatedNode>,
}

/// A path through the graph. `length` counts relationships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GraphPath {
    pub nodes: Vec<GraphNode>,
    pub relationships: Vec<String>,
    pub length: usize,
}

impl GraphPath {
    pub fn new(nodes: Vec<GraphNode>, relationships: Vec<String>) -> Self {
        let length = relationships.len();
        Self {
            nodes,
            relationships,
            length,
        }
    }
}

/// Outcome of a shortest-path lookup.
///
/// A missing path is a normal answer, not an error.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum PathResult {
    Found {
        path: GraphPath,
    },
    #[serde(rename_all = "camelCase")]
    NotFound {
        message: String,
        from_node: String,
        to_node: String,
    },
}

impl PathResult {
    pub fn not_found(from_node: impl Into<String>, to_node: impl Into<String>) -> Self {
        Self::NotFound {
            message: "No path found between these nodes".to_string(),
            from_node: from_node.into(),
            to_node: to_node.into(),
        }
    }
}

/// A dynamic node search.
///
/// Every field narrows the match; an empty pattern matches any node.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct PatternQuery {
    /// Label the node must carry.
    #[serde(default)]
    pub node_type: Option<String>,
    /// Exact property values the node must have.
    #[serde(default)]
    pub properties: Option<Map<String, Value>>,
    /// Relationship types, any of which must touch the node.
    #[serde(default)]
    pub relationships: Option<Vec<String>>,
    /// Display key of a node this one must be adjacent to.
    #[serde(default)]
    pub connected_to: Option<String>,
    #[serde(default)]
    pub limit: Option<usize>,
}

/// Nodes matched by a pattern search, plus the query that produced them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatternSearchResult {
    pub nodes: Vec<GraphNode>,
    pub query: String,
}

/// Size and vocabulary of the graph.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    pub node_count: i64,
    pub relationship_count: i64,
    pub labels: Vec<String>,
    pub relationship_types: Vec<String>,
}
