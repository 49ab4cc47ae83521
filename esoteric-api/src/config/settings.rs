//! Settings read from the environment.

use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

use anyhow::{anyhow, Result};
use axum::http::{header, HeaderName, HeaderValue, Method};
use esoteric_graph::Neo4jConnectionConfig;
use tower_http::cors::{AllowHeaders, CorsLayer};
use tracing::warn;

use crate::auth::{DEFAULT_USER_HEADER, PROFILE_HEADERS};

/// Default maximum number of PostgreSQL connections.
const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 5;

/// Default bind address.
const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Default listening port.
const DEFAULT_SERVER_PORT: u16 = 5000;

/// Bolt endpoint used when only the password is configured.
const DEFAULT_NEO4J_URI: &str = "bolt://localhost:7687";

/// Default Neo4j user.
const DEFAULT_NEO4J_USERNAME: &str = "neo4j";

/// Origins allowed when `CORS_ORIGINS` is not set.
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Runtime settings of the API server.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub database_url: String,
    pub database_max_connections: u32,
    pub server_host: IpAddr,
    pub server_port: u16,
    /// `None` when Neo4j is not configured; graph routes then answer 503.
    pub neo4j: Option<Neo4jConnectionConfig>,
    /// Header carrying the identity provider's subject claim.
    pub auth_header: HeaderName,
    pub cors_origins: Vec<String>,
}

impl ApiConfig {
    /// Read settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: PostgreSQL connection string (required)
    /// - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
    /// - `SERVER_HOST`: bind address (default: 127.0.0.1)
    /// - `SERVER_PORT`: listening port (default: 5000)
    /// - `NEO4J_PASSWORD`: enables graph exploration
    /// - `NEO4J_URI` (default: bolt://localhost:7687), `NEO4J_USERNAME` (default: neo4j)
    /// - `AUTH_USER_HEADER`: subject claim header (default: x-user-id)
    /// - `CORS_ORIGINS`: comma separated allowed origins
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let database_url = var("DATABASE_URL").ok_or_else(|| anyhow!("DATABASE_URL must be set"))?;

        let database_max_connections = parse_or_default(
            "DATABASE_MAX_CONNECTIONS",
            var("DATABASE_MAX_CONNECTIONS"),
            DEFAULT_DATABASE_MAX_CONNECTIONS,
        );
        let server_host = parse_or_default("SERVER_HOST", var("SERVER_HOST"), DEFAULT_SERVER_HOST);
        let server_port = parse_or_default("SERVER_PORT", var("SERVER_PORT"), DEFAULT_SERVER_PORT);

        let neo4j = match var("NEO4J_PASSWORD") {
            Some(password) => Some(Neo4jConnectionConfig {
                uri: var("NEO4J_URI").unwrap_or_else(|| DEFAULT_NEO4J_URI.to_string()),
                username: var("NEO4J_USERNAME")
                    .unwrap_or_else(|| DEFAULT_NEO4J_USERNAME.to_string()),
                password,
            }),
            None => {
                if var("NEO4J_URI").is_some() {
                    warn!("NEO4J_URI is set but NEO4J_PASSWORD is not, graph exploration disabled");
                }
                None
            }
        };

        let auth_header = match var("AUTH_USER_HEADER") {
            Some(name) => HeaderName::try_from(name.trim().to_lowercase())
                .map_err(|e| anyhow!("Invalid AUTH_USER_HEADER '{}': {}", name, e))?,
            None => HeaderName::from_static(DEFAULT_USER_HEADER),
        };

        let cors_origins = match var("CORS_ORIGINS") {
            Some(origins) => origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect(),
            None => DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
        };

        Ok(Self {
            database_url,
            database_max_connections,
            server_host,
            server_port,
            neo4j,
            auth_header,
            cors_origins,
        })
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.server_host, self.server_port)
    }
}

fn parse_or_default<T: std::str::FromStr>(key: &str, value: Option<String>, default: T) -> T {
    match value {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, "Invalid value, using default");
            default
        }),
        None => default,
    }
}

/// CORS for the configured browser origins.
///
/// Origins that are not valid header values are skipped.
pub fn create_cors_layer(origins: &[String], auth_header: &HeaderName) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(AllowHeaders::list(allowed_headers(auth_header)))
}

fn allowed_headers(auth_header: &HeaderName) -> Vec<HeaderName> {
    let mut headers = vec![header::CONTENT_TYPE, auth_header.clone()];
    headers.extend(PROFILE_HEADERS.into_iter().map(HeaderName::from_static));
    headers
}
