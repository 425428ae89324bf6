//! Response relay subsystem.
//!
//! # Data Flow
//! ```text
//! upstream outcome (reqwest::Result<Response>)
//!     → Ok(any status)   → stream.rs: copy status + headers, pipe body
//!     → Err(transport)   → stream.rs: 500 + textual fallback body
//!
//! buffered `post` outcome
//!     → response.rs: RelayedResponse wrapper (success)
//!     → response.rs: RequestError carrying the wrapper (failure)
//! ```
//!
//! # Design Decisions
//! - Success and failure relay the same way (status, headers, body); the
//!   caller cannot tell a relayed error response from a relayed success
//! - The streamed relay is a direct pipe; backpressure from the client
//!   gates upstream reads, and dropping the response aborts the transfer
//! - The transport-failure fallback never panics and always writes a
//!   non-empty body

pub mod response;
pub mod stream;

pub use response::{RelayedResponse, RequestError};
pub use stream::{relay_streamed, relay_transport_failure, text_response};
