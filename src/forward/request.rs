//! The transient outbound request value.

use axum::body::Bytes;
use axum::http::{HeaderMap, Method};

/// How the upstream response body will be consumed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseKind {
    /// Full body loaded into memory (the `post` path).
    Buffered,
    /// Body piped chunk by chunk to the caller (the `pass` path).
    Streamed,
}

/// An outbound request under construction.
///
/// Built fresh for every `post`/`pass` call and never persisted. Pre-send
/// hooks receive a mutable reference to this value and may rewrite any
/// field before dispatch.
#[derive(Debug, Clone)]
pub struct OutboundRequest {
    /// Absolute request URL (connection location + inbound path).
    pub url: String,

    /// Outbound HTTP method.
    pub method: Method,

    /// Outbound headers.
    pub headers: HeaderMap,

    /// Request body, if any.
    pub body: Option<Bytes>,

    /// Whether the response will be buffered or streamed.
    pub response_kind: ResponseKind,
}
