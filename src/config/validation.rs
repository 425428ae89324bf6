//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check referential integrity (routes and the default reference
//!   declared connections)
//! - Validate connection locations as absolute URLs
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: GatewayConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::fmt;

use url::Url;

use crate::config::schema::GatewayConfig;

/// A single semantic problem in a config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: String,
    pub message: String,
}

impl ValidationError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a parsed config, collecting every problem found.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.connections.is_empty() {
        errors.push(ValidationError::new(
            "connections",
            "at least one connection must be declared",
        ));
    }

    if config.default_connection.is_empty() {
        errors.push(ValidationError::new(
            "default_connection",
            "a default connection key is required",
        ));
    } else if !config.connections.contains_key(&config.default_connection) {
        errors.push(ValidationError::new(
            "default_connection",
            format!("references undeclared connection `{}`", config.default_connection),
        ));
    }

    for (key, entry) in &config.connections {
        let field = format!("connections.{key}.location");
        if entry.location.is_empty() {
            errors.push(ValidationError::new(field, "location is empty"));
        } else if let Err(e) = Url::parse(&entry.location) {
            errors.push(ValidationError::new(
                field,
                format!("not a valid base URL: {e}"),
            ));
        }
    }

    for (index, route) in config.routes.iter().enumerate() {
        if !route.path_prefix.starts_with('/') {
            errors.push(ValidationError::new(
                format!("routes[{index}].path_prefix"),
                "must start with `/`",
            ));
        }
        if !config.connections.contains_key(&route.connection) {
            errors.push(ValidationError::new(
                format!("routes[{index}].connection"),
                format!("references undeclared connection `{}`", route.connection),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
