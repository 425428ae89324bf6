//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::registry::ConnectionConfig;

/// Root configuration for the gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Key of the connection used when no route matches.
    pub default_connection: String,

    /// Named backend connections.
    pub connections: HashMap<String, ConnectionEntry>,

    /// Path-prefix routes selecting a connection.
    pub routes: Vec<RouteConfig>,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// One backend connection as declared in the config file.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ConnectionEntry {
    /// Base URL forwarded paths are appended to. Kept verbatim; no
    /// trailing-slash normalization.
    pub location: String,

    /// Force JSON encoding for all forwarded bodies.
    #[serde(default)]
    pub json: bool,
}

impl ConnectionEntry {
    /// Build the runtime connection config for this entry.
    pub fn to_connection_config(&self) -> ConnectionConfig {
        ConnectionConfig::new(&self.location).json(self.json)
    }
}

/// Route selecting a connection by request path prefix.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RouteConfig {
    /// Path prefix to match (must start with `/`).
    pub path_prefix: String,

    /// Connection key to forward to.
    pub connection: String,
}
