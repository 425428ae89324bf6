//! Connection operations subsystem.
//!
//! # Data Flow
//! ```text
//! post(url, payload, options):
//!     serialize payload → OutboundRequest (POST, forced JSON headers)
//!     → before_post hook → dispatch (buffered)
//!     → 2xx: RelayedResponse | other: RequestError | transport: synthetic 500
//!
//! pass(inbound request):
//!     copy method/path/headers → before_pass hook
//!     → forwarding decision (body encoding, method upgrade)
//!     → dispatch (streamed) → relay status/headers/body onto the response
//! ```
//!
//! # Design Decisions
//! - `pass` is infallible: every outcome, including pure transport
//!   failures, is rendered onto the returned response
//! - No retries in either path; retry policy belongs to callers
//! - The inbound body is buffered (capped) because the decision may
//!   re-encode it; only the upstream response is streamed

pub mod client;

pub use client::{Connection, PostOptions};
