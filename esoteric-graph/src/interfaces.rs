//! Graph provider trait definition.

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::errors::GraphError;
use crate::query::CypherQuery;

/// One result row, keyed by the query's returned column names.
pub type GraphRow = Map<String, Value>;

/// Executes Cypher against a graph backend.
///
/// Implementations only run queries and convert backend values to JSON; query
/// construction and result shaping live in `GraphService`.
#[async_trait]
pub trait GraphProvider: Send + Sync {
    /// Run a read query and return every row.
    ///
    /// Each row contains exactly the columns listed in `query.columns`.
    async fn fetch_rows(&self, query: &CypherQuery) -> Result<Vec<GraphRow>, GraphError>;
}
