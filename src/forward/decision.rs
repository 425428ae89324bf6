//! Body-encoding decision for forwarded requests.
//!
//! # Responsibilities
//! - Decide the outbound method and body encoding from the inbound
//!   method, declared content-type, and raw body bytes
//! - Upgrade body-less methods to POST when JSON forcing is enabled
//! - Keep pre-encoded form bodies byte-for-byte intact
//!
//! # Design Decisions
//! - Precedence: empty body, then forced JSON, then the method allow-list,
//!   then form passthrough, then JSON normalization
//! - Bytes that parse as JSON are re-serialized compact; anything else is
//!   wrapped as a JSON string of its lossy-UTF-8 text

use axum::body::Bytes;
use axum::http::{header, HeaderMap, HeaderValue, Method};
use serde_json::Value;

use crate::forward::request::OutboundRequest;

/// Content-type stamped on every JSON-encoded outbound body.
pub const JSON_CONTENT_TYPE: &str = "application/x-json;charset=UTF-8";

/// Methods that carry a request body.
const BODY_METHODS: [Method; 3] = [Method::POST, Method::PUT, Method::PATCH];

/// Returns true if the method is allowed to carry a body.
pub fn method_allows_body(method: &Method) -> bool {
    BODY_METHODS.contains(method)
}

/// The body an outbound request will carry.
#[derive(Debug, Clone, PartialEq)]
pub enum PlannedBody {
    /// No body attached, whatever the inbound request carried.
    Omitted,

    /// Inbound bytes forwarded unchanged.
    Verbatim(Bytes),

    /// Body re-serialized as JSON; forces the JSON content headers.
    Json(Bytes),
}

/// Outcome of the forwarding decision: final method plus body encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ForwardPlan {
    pub method: Method,
    pub body: PlannedBody,
}

impl ForwardPlan {
    /// Write this plan onto an outbound request.
    ///
    /// A JSON body forces `content-type`/`content-length`; a verbatim body
    /// leaves the copied inbound headers untouched.
    pub fn apply(self, outbound: &mut OutboundRequest) {
        outbound.method = self.method;
        match self.body {
            PlannedBody::Omitted => {}
            PlannedBody::Verbatim(bytes) => {
                outbound.body = Some(bytes);
            }
            PlannedBody::Json(bytes) => {
                force_json_headers(&mut outbound.headers, bytes.len());
                outbound.body = Some(bytes);
            }
        }
    }
}

/// Stamp the forced JSON content headers. These always win over whatever
/// the caller supplied.
pub fn force_json_headers(headers: &mut HeaderMap, body_len: usize) {
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(body_len));
}

/// Decide the outbound method and body encoding.
///
/// `content_type` is the inbound request's declared content-type, if any.
/// `force_json` is the connection's `json` flag.
pub fn plan(method: Method, content_type: Option<&str>, body: Bytes, force_json: bool) -> ForwardPlan {
    if body.is_empty() {
        return ForwardPlan {
            method,
            body: PlannedBody::Omitted,
        };
    }

    if force_json {
        let method = if method_allows_body(&method) {
            method
        } else {
            Method::POST
        };
        return ForwardPlan {
            method,
            body: PlannedBody::Json(reencode_json(&body)),
        };
    }

    if !method_allows_body(&method) {
        return ForwardPlan {
            method,
            body: PlannedBody::Omitted,
        };
    }

    if is_form_content_type(content_type) {
        return ForwardPlan {
            method,
            body: PlannedBody::Verbatim(body),
        };
    }

    ForwardPlan {
        method,
        body: PlannedBody::Json(reencode_json(&body)),
    }
}

/// Detect pre-encoded form bodies by their media type, ignoring parameters
/// such as the multipart boundary.
fn is_form_content_type(content_type: Option<&str>) -> bool {
    let Some(value) = content_type else {
        return false;
    };
    let media_type = value
        .split(';')
        .next()
        .unwrap_or("")
        .trim()
        .to_ascii_lowercase();
    media_type == "multipart/form-data" || media_type == "application/x-www-form-urlencoded"
}

fn reencode_json(raw: &Bytes) -> Bytes {
    let value: Value = serde_json::from_slice(raw)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(raw).into_owned()));
    serde_json::to_vec(&value)
        .expect("serializing a serde_json::Value cannot fail")
        .into()
}
