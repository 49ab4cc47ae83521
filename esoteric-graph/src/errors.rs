//! Graph error types.

use thiserror::Error;

/// Errors from graph operations.
#[derive(Debug, Clone, Error)]
pub enum GraphError {
    /// No graph database is configured or the connection failed at startup.
    #[error("Neo4j database not connected. Please configure Neo4j credentials.")]
    NotConnected,

    /// Failed to establish a connection.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The database rejected or failed a query.
    #[error("Query error: {0}")]
    QueryError(String),

    /// A returned row did not have the expected shape.
    #[error("Decode error: {0}")]
    DecodeError(String),

    /// The request cannot be turned into a safe query.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

impl GraphError {
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    pub fn decode(msg: impl Into<String>) -> Self {
        Self::DecodeError(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::ValidationError(msg.into())
    }
}

impl From<neo4rs::Error> for GraphError {
    fn from(err: neo4rs::Error) -> Self {
        Self::QueryError(err.to_string())
    }
}
