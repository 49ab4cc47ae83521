//! # Esoteric Graph
//!
//! Read-only exploration of a Neo4j knowledge graph of cards, signs, planets
//! and their correspondences.
//!
//! ## Modules
//!
//! - [`query`]: Builds parameterised Cypher for every operation
//! - [`interfaces`]: The `GraphProvider` trait that executes Cypher
//! - [`neo4j`]: `GraphProvider` implementation over `neo4rs`
//! - [`service`]: `GraphService`, the API used by application code
//! - [`config`]: Limits applied by the service
//! - [`errors`]: Error types

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod neo4j;
pub mod query;
pub mod service;

pub use config::GraphServiceConfig;
pub use errors::GraphError;
pub use interfaces::{GraphProvider, GraphRow};
pub use neo4j::{Neo4jConnectionConfig, Neo4jProvider};
pub use query::CypherQuery;
pub use service::GraphService;
