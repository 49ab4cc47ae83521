//! # Esoteric API
//!
//! HTTP surface of the esoteric repository. Authenticated users keep tarot
//! readings and astrology charts in PostgreSQL; anyone can explore the
//! correspondence graph stored in Neo4j.
//!
//! The binary wires [`Dependencies`] from the environment and serves the
//! router built by [`server::create_app`].

pub mod auth;
pub mod config;
pub mod errors;
pub mod server;

pub use auth::AuthenticatedUser;
pub use config::{create_cors_layer, ApiConfig, Dependencies};
pub use errors::ApiError;
pub use server::state::AppState;
