//! The named connection store.
//!
//! # Responsibilities
//! - Hold named connection configs with a designated default
//! - Resolve a key (or the default) to a config, or fail explicitly
//! - Bind `Connection` values to resolved configs
//!
//! # Design Decisions
//! - `add_connection` is insert-or-overwrite, last write wins
//! - `set_default_connection` does not check existence; a dangling default
//!   fails at resolution time, not here
//! - Config validation happens only for the constructor's default entry

use std::collections::HashMap;
use std::sync::Arc;

use thiserror::Error;
use url::Url;

use crate::connection::Connection;
use crate::registry::config::ConnectionConfig;

/// Errors from registry construction and resolution.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The configuration registered for `key` is unusable.
    #[error("invalid configuration for connection `{key}`: {reason}")]
    InvalidConfig { key: String, reason: String },

    /// The resolved key names no registered connection.
    #[error("unknown connection `{0}`")]
    Unknown(String),

    /// The shared outbound client could not be constructed.
    #[error("failed to build outbound HTTP client: {0}")]
    Client(#[from] reqwest::Error),
}

/// Named registry of backend connections.
///
/// Built once by a single writer, then shared read-only (typically behind
/// an `Arc`). Concurrent resolution is safe; concurrent mutation is ruled
/// out by `&mut self` on the mutators.
pub struct ConnectionRegistry {
    register: HashMap<String, Arc<ConnectionConfig>>,
    default_connection: String,
    client: reqwest::Client,
}

impl ConnectionRegistry {
    /// Create a registry seeded with one connection, set as the default.
    ///
    /// Fails when the default config has no usable base location, or when
    /// the outbound client cannot be built. Redirects are never followed
    /// by the outbound transport.
    pub fn new(
        default_key: impl Into<String>,
        default_config: ConnectionConfig,
    ) -> Result<Self, RegistryError> {
        let default_key = default_key.into();
        validate_location(&default_key, &default_config)?;

        let client = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()?;

        let mut registry = Self {
            register: HashMap::new(),
            default_connection: String::new(),
            client,
        };
        registry.add_connection(default_key.clone(), default_config);
        registry.set_default_connection(default_key);
        Ok(registry)
    }

    /// Insert or overwrite the connection registered under `key`.
    pub fn add_connection(&mut self, key: impl Into<String>, config: ConnectionConfig) {
        self.register.insert(key.into(), Arc::new(config));
    }

    /// Repoint the default connection at `key`.
    ///
    /// The key is not checked against the register; resolving a dangling
    /// default fails with [`RegistryError::Unknown`] later.
    pub fn set_default_connection(&mut self, key: impl Into<String>) {
        self.default_connection = key.into();
    }

    /// The current default connection key.
    pub fn default_connection(&self) -> &str {
        &self.default_connection
    }

    /// Resolve `key` to its registered config. A `None` or empty key
    /// resolves the current default.
    pub fn resolve_config(&self, key: Option<&str>) -> Result<&Arc<ConnectionConfig>, RegistryError> {
        let resolved = self.resolve_key(key);
        self.register
            .get(resolved)
            .ok_or_else(|| RegistryError::Unknown(resolved.to_string()))
    }

    /// Bind a [`Connection`] to the resolved config and key.
    pub fn connection(&self, key: Option<&str>) -> Result<Connection, RegistryError> {
        let resolved = self.resolve_key(key).to_string();
        let config = self.resolve_config(key)?.clone();
        Ok(Connection::new(resolved, config, self.client.clone()))
    }

    fn resolve_key<'a>(&'a self, key: Option<&'a str>) -> &'a str {
        match key {
            Some(key) if !key.is_empty() => key,
            _ => &self.default_connection,
        }
    }
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConnectionRegistry")
            .field("connections", &self.register.keys().collect::<Vec<_>>())
            .field("default_connection", &self.default_connection)
            .finish()
    }
}

fn validate_location(key: &str, config: &ConnectionConfig) -> Result<(), RegistryError> {
    if config.location().is_empty() {
        return Err(RegistryError::InvalidConfig {
            key: key.to_string(),
            reason: "location is empty".to_string(),
        });
    }
    Url::parse(config.location()).map_err(|e| RegistryError::InvalidConfig {
        key: key.to_string(),
        reason: format!("location is not a valid base URL: {e}"),
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ConnectionRegistry {
        ConnectionRegistry::new("api", ConnectionConfig::new("http://api:9000")).unwrap()
    }

    #[test]
    fn test_resolve_returns_registered_config_identity() {
        let mut registry = registry();
        registry.add_connection("billing", ConnectionConfig::new("http://billing:9001"));

        let first = registry.resolve_config(Some("billing")).unwrap().clone();
        let second = registry.resolve_config(Some("billing")).unwrap().clone();
        // The very same config, not a copy.
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.location(), "http://billing:9001");
    }

    #[test]
    fn test_none_and_empty_resolve_to_default() {
        let registry = registry();
        let by_none = registry.resolve_config(None).unwrap();
        let by_empty = registry.resolve_config(Some("")).unwrap();
        let by_name = registry.resolve_config(Some("api")).unwrap();
        assert!(Arc::ptr_eq(by_none, by_name));
        assert!(Arc::ptr_eq(by_empty, by_name));
    }

    #[test]
    fn test_unknown_key_fails_at_resolution() {
        let registry = registry();
        let err = registry.resolve_config(Some("nope")).unwrap_err();
        assert!(matches!(err, RegistryError::Unknown(key) if key == "nope"));
    }

    #[test]
    fn test_dangling_default_is_legal_until_resolved() {
        let mut registry = registry();
        registry.set_default_connection("not-registered-yet");

        let err = registry.resolve_config(None).unwrap_err();
        assert!(matches!(err, RegistryError::Unknown(key) if key == "not-registered-yet"));

        // Registering the key afterwards heals resolution.
        registry.add_connection("not-registered-yet", ConnectionConfig::new("http://late:9002"));
        let config = registry.resolve_config(None).unwrap();
        assert_eq!(config.location(), "http://late:9002");
    }

    #[test]
    fn test_add_connection_overwrites() {
        let mut registry = registry();
        registry.add_connection("api", ConnectionConfig::new("http://api-v2:9000"));
        let config = registry.resolve_config(Some("api")).unwrap();
        assert_eq!(config.location(), "http://api-v2:9000");
    }

    #[test]
    fn test_empty_location_rejected() {
        let err = ConnectionRegistry::new("api", ConnectionConfig::new("")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidConfig { key, .. } if key == "api"));
    }

    #[test]
    fn test_relative_location_rejected() {
        let err = ConnectionRegistry::new("api", ConnectionConfig::new("/not/absolute")).unwrap_err();
        assert!(matches!(err, RegistryError::InvalidConfig { .. }));
    }

    #[test]
    fn test_connection_carries_resolved_key() {
        let registry = registry();
        let connection = registry.connection(None).unwrap();
        assert_eq!(connection.key(), "api");
    }
}
