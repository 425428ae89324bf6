//! Outbound request construction subsystem.
//!
//! # Data Flow
//! ```text
//! inbound request (method, content-type, body bytes)
//!     → decision.rs (pick outbound method + body encoding)
//!     → request.rs (OutboundRequest, mutable until dispatch)
//!     → pre-send hook (optional, per connection)
//!     → handed to the outbound transport
//! ```
//!
//! # Design Decisions
//! - The encoding decision is a pure function over the inbound request's
//!   method, declared content-type, and raw body; no I/O, unit-testable
//! - multipart and urlencoded bodies are opaque pre-encoded wire formats
//!   and are never re-serialized; everything else is normalized to JSON
//! - An empty inbound body always means no outbound body, so the decision
//!   never invents a payload

pub mod decision;
pub mod request;

pub use decision::{plan, ForwardPlan, PlannedBody, JSON_CONTENT_TYPE};
pub use request::{OutboundRequest, ResponseKind};
