//! Connection registry subsystem.
//!
//! # Data Flow
//! ```text
//! setup (single writer):
//!     ConnectionRegistry::new(default_key, config)
//!     → add_connection / set_default_connection
//!     → wrapped in Arc, shared read-only
//!
//! per request (many readers):
//!     resolve_config(key | None)  → Arc<ConnectionConfig>
//!     connection(key | None)      → Connection bound to config + key
//! ```
//!
//! # Design Decisions
//! - Immutable after setup: mutators take `&mut self`, so sharing via Arc
//!   makes the single-writer-many-readers expectation a compile-time fact
//! - The default may point at an unregistered key; that only fails when it
//!   is actually resolved
//! - One shared outbound client, redirects disabled, built at construction

pub mod config;
pub mod store;

pub use config::{ConnectionConfig, OutboundHook};
pub use store::{ConnectionRegistry, RegistryError};
