//! Neo4j module - connection, value conversion and the `GraphProvider` implementation.
mod connection;
mod convert;
mod provider;

pub use connection::{connect, Neo4jConnectionConfig};
pub use convert::{bolt_to_json, json_to_bolt};
pub use provider::Neo4jProvider;
