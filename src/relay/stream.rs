//! Streaming relay of upstream outcomes onto outbound responses.
//!
//! # Responsibilities
//! - Copy upstream status and every upstream header onto the response
//! - Pipe the upstream body as a stream, never buffering it
//! - Render pure transport failures as a 500 with a textual body

use axum::body::Body;
use axum::http::StatusCode;
use axum::response::Response;

/// Relay an upstream response verbatim: its status, all of its headers,
/// and its body as a direct pipe.
///
/// The body stream owns the upstream response, so dropping the returned
/// response (client disconnect) aborts the in-flight upstream transfer.
pub fn relay_streamed(upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let headers = upstream.headers().clone();

    let mut response = Response::new(Body::from_stream(upstream.bytes_stream()));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

/// Relay a transport failure that produced no structured response.
///
/// Last line of defense before the caller: always resolves the outbound
/// channel with a 500 and a non-empty textual body.
pub fn relay_transport_failure(cause: &dyn std::fmt::Display) -> Response {
    text_response(
        StatusCode::INTERNAL_SERVER_ERROR,
        format!("upstream request failed: {cause}"),
    )
}

/// A plain-text response with the given status.
pub fn text_response(status: StatusCode, body: String) -> Response {
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response
}
