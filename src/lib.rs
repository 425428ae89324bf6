//! Lightweight HTTP forwarding layer.
//!
//! A named registry of upstream backend connections. `pass` forwards an
//! inbound request to a backend and streams the backend's response (or
//! error response) back; `post` fires a buffered JSON POST and returns a
//! cacheable response wrapper. Redirects are never followed; a 3xx from
//! the upstream is relayed as-is.

pub mod config;
pub mod connection;
pub mod forward;
pub mod gateway;
pub mod registry;
pub mod relay;

pub use connection::{Connection, PostOptions};
pub use forward::{OutboundRequest, JSON_CONTENT_TYPE};
pub use registry::{ConnectionConfig, ConnectionRegistry, RegistryError};
pub use relay::{RelayedResponse, RequestError};
