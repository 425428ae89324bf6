//! Gateway subsystem: the binary's HTTP surface.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → server.rs (axum catch-all handler, request ID, tracing)
//!     → routes.rs (path prefix → connection key)
//!     → registry resolves the connection
//!     → connection.pass streams the backend response back
//! ```
//!
//! # Design Decisions
//! - Route table is immutable after construction, longest prefix wins,
//!   no match falls through to the default connection
//! - Resolution failures surface as 502 with a short text body; the
//!   client never sees an unhandled failure

pub mod routes;
pub mod server;

pub use routes::RouteTable;
pub use server::{build_registry, GatewayServer};
