//! Cypher construction.
//!
//! Values always travel as parameters. Labels, relationship types and
//! property keys cannot be parameterised in Cypher, so they are checked with
//! [`is_identifier`] before being interpolated.

use esoteric_shared::PatternQuery;
use serde_json::Value;

use crate::errors::GraphError;

/// Matches a node by any of its display keys.
const DISPLAY_KEY_MATCH: &str = "{var}.name = ${param} OR {var}.label = ${param} OR {var}.title = ${param}";

/// A Cypher statement with its parameters and returned columns.
#[derive(Debug, Clone, PartialEq)]
pub struct CypherQuery {
    pub text: String,
    pub params: Vec<(String, Value)>,
    /// Column names in the order they are returned.
    pub columns: Vec<&'static str>,
}

impl CypherQuery {
    pub fn new(text: impl Into<String>, columns: Vec<&'static str>) -> Self {
        Self {
            text: text.into(),
            params: Vec::new(),
            columns,
        }
    }

    pub fn param(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Look up a parameter by name.
    pub fn get_param(&self, key: &str) -> Option<&Value> {
        self.params
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }
}

/// True for plain Cypher identifiers: `[A-Za-z_][A-Za-z0-9_]*`.
pub fn is_identifier(value: &str) -> bool {
    let mut chars = value.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn require_identifier(kind: &str, value: &str) -> Result<(), GraphError> {
    if is_identifier(value) {
        Ok(())
    } else {
        Err(GraphError::validation(format!(
            "{} '{}' must contain only letters, digits and underscores",
            kind, value
        )))
    }
}

fn display_key_match(var: &str, param: &str) -> String {
    DISPLAY_KEY_MATCH
        .replace("{var}", var)
        .replace("{param}", param)
}

/// The first node whose display key equals `name`.
pub fn node_lookup(name: &str) -> CypherQuery {
    let text = format!(
        "MATCH (n) WHERE {} \
         RETURN properties(n) AS node, labels(n) AS labels \
         LIMIT 1",
        display_key_match("n", "name")
    );
    CypherQuery::new(text, vec!["node", "labels"]).param("name", name)
}

/// Distinct neighbours of the node(s) whose display key equals `name`.
pub fn related_nodes(name: &str, limit: usize) -> CypherQuery {
    let text = format!(
        "MATCH (n)-[r]-(related) WHERE {} \
         RETURN DISTINCT properties(related) AS node, type(r) AS relationship, labels(related) AS labels \
         LIMIT {}",
        display_key_match("n", "name"),
        limit
    );
    CypherQuery::new(text, vec!["node", "relationship", "labels"]).param("name", name)
}

/// Shortest undirected path of at most `max_length` hops between two display keys.
pub fn shortest_path(from: &str, to: &str, max_length: u32) -> CypherQuery {
    let text = format!(
        "MATCH (from) WHERE {} \
         MATCH (to) WHERE {} \
         MATCH path = shortestPath((from)-[*..{}]-(to)) \
         RETURN [x IN nodes(path) | {{properties: properties(x), labels: labels(x)}}] AS nodes, \
                [r IN relationships(path) | type(r)] AS relationships \
         LIMIT 1",
        display_key_match("from", "fromNode"),
        display_key_match("to", "toNode"),
        max_length
    );
    CypherQuery::new(text, vec!["nodes", "relationships"])
        .param("fromNode", from)
        .param("toNode", to)
}

/// Builds the search for a [`PatternQuery`].
///
/// Relationship filters extend the match pattern, property filters and the
/// adjacency filter are joined with `AND`.
pub fn pattern_search(pattern: &PatternQuery, limit: usize) -> Result<CypherQuery, GraphError> {
    let mut node = String::from("(n");
    if let Some(ref node_type) = pattern.node_type {
        require_identifier("nodeType", node_type)?;
        node.push(':');
        node.push_str(node_type);
    }
    node.push(')');

    let mut match_clause = format!("MATCH {}", node);
    if let Some(ref relationships) = pattern.relationships {
        if !relationships.is_empty() {
            for relationship in relationships {
                require_identifier("relationship", relationship)?;
            }
            match_clause.push_str(&format!("-[r:{}]-(connected)", relationships.join("|")));
        }
    }

    let mut conditions = Vec::new();
    let mut params: Vec<(String, Value)> = Vec::new();

    if let Some(ref properties) = pattern.properties {
        for (idx, (key, value)) in properties.iter().enumerate() {
            require_identifier("property", key)?;
            let param = format!("prop{}", idx);
            conditions.push(format!("n.{} = ${}", key, param));
            params.push((param, value.clone()));
        }
    }

    if let Some(ref connected_to) = pattern.connected_to {
        conditions.push(format!(
            "EXISTS {{ MATCH (n)--(target) WHERE {} }}",
            display_key_match("target", "connectedTo")
        ));
        params.push(("connectedTo".to_string(), Value::String(connected_to.clone())));
    }

    let mut text = match_clause;
    if !conditions.is_empty() {
        text.push_str(" WHERE ");
        text.push_str(&conditions.join(" AND "));
    }
    text.push_str(&format!(
        " RETURN DISTINCT properties(n) AS properties, labels(n) AS labels LIMIT {}",
        limit
    ));

    Ok(CypherQuery {
        text,
        params,
        columns: vec!["properties", "labels"],
    })
}

pub fn node_count() -> CypherQuery {
    CypherQuery::new("MATCH (n) RETURN count(n) AS nodeCount", vec!["nodeCount"])
}

/// Each relationship counted once regardless of direction.
pub fn relationship_count() -> CypherQuery {
    CypherQuery::new(
        "MATCH ()-[r]->() RETURN count(r) AS relationshipCount",
        vec!["relationshipCount"],
    )
}

pub fn labels() -> CypherQuery {
    CypherQuery::new(
        "CALL db.labels() YIELD label RETURN collect(label) AS labels",
        vec!["labels"],
    )
}

pub fn relationship_types() -> CypherQuery {
    CypherQuery::new(
        "CALL db.relationshipTypes() YIELD relationshipType \
         RETURN collect(relationshipType) AS relationshipTypes",
        vec!["relationshipTypes"],
    )
}
