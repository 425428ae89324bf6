//! Path-prefix route table.
//!
//! # Responsibilities
//! - Map a request path to a connection key
//! - Prefer the longest matching prefix
//! - Fall through to the default connection on no match
//!
//! # Design Decisions
//! - Prefix matching is case-sensitive
//! - No regex to guarantee O(n) matching over a handful of routes

use crate::config::schema::{GatewayConfig, RouteConfig};

/// Immutable path-prefix → connection-key table.
#[derive(Debug)]
pub struct RouteTable {
    /// Routes sorted by prefix length, longest first.
    routes: Vec<RouteConfig>,
    default_connection: String,
}

impl RouteTable {
    /// Build the table from a validated config.
    pub fn from_config(config: &GatewayConfig) -> Self {
        let mut routes = config.routes.clone();
        routes.sort_by(|a, b| b.path_prefix.len().cmp(&a.path_prefix.len()));
        Self {
            routes,
            default_connection: config.default_connection.clone(),
        }
    }

    /// Select the connection key for a request path.
    pub fn select(&self, path: &str) -> &str {
        for route in &self.routes {
            if path.starts_with(&route.path_prefix) {
                return &route.connection;
            }
        }
        &self.default_connection
    }
}
