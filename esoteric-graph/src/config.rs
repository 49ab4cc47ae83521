//! Configuration types for the GraphService.

/// Limits applied by `GraphService` before queries reach the database.
#[derive(Debug, Clone)]
pub struct GraphServiceConfig {
    /// Path length used when the caller does not give one.
    pub default_path_length: u32,
    /// Longest variable-length pattern a caller may request.
    pub max_path_length: u32,
    /// Result limit used when a pattern search does not give one.
    pub default_search_limit: usize,
    /// Upper bound on pattern search results.
    pub max_search_limit: usize,
    /// Number of neighbours returned with a node lookup.
    pub related_nodes_limit: usize,
}

impl Default for GraphServiceConfig {
    fn default() -> Self {
        Self {
            default_path_length: 5,
            max_path_length: 15,
            default_search_limit: 50,
            max_search_limit: 500,
            related_nodes_limit: 20,
        }
    }
}
