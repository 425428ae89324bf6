//! Buffered response wrapper and the error that carries it.

use axum::body::Bytes;
use axum::http::{HeaderMap, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// A fully-buffered upstream response.
///
/// The same shape is used whether the upstream call succeeded or failed;
/// a failed `post` carries one of these inside [`RequestError`].
#[derive(Debug, Clone)]
pub struct RelayedResponse {
    /// Upstream status code.
    pub status: StatusCode,

    /// Upstream response headers.
    pub headers: HeaderMap,

    /// Full response body.
    pub body: Bytes,

    /// The relative URL the request was issued against, for traceability.
    pub url: String,
}

impl RelayedResponse {
    pub fn new(
        status: StatusCode,
        headers: HeaderMap,
        body: Bytes,
        url: impl Into<String>,
    ) -> Self {
        Self {
            status,
            headers,
            body,
            url: url.into(),
        }
    }

    /// Deserialize the body as JSON.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }

    /// The body as lossy UTF-8 text.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Failure of a `post` call.
///
/// Always carries a populated [`RelayedResponse`]: an upstream error status
/// carries the real response, and a pure transport failure (connection
/// refused, DNS) is wrapped in a synthetic 500 so callers never have to
/// probe for a missing field.
#[derive(Debug, Error)]
#[error("upstream request `{}` failed with status {}", response.url, response.status)]
pub struct RequestError {
    pub response: RelayedResponse,
}

impl RequestError {
    pub fn new(response: RelayedResponse) -> Self {
        Self { response }
    }

    /// Wrap a transport failure that produced no structured response.
    pub fn synthetic(url: impl Into<String>, cause: &dyn std::fmt::Display) -> Self {
        Self {
            response: RelayedResponse::new(
                StatusCode::INTERNAL_SERVER_ERROR,
                HeaderMap::new(),
                Bytes::from(format!("upstream request failed: {cause}")),
                url,
            ),
        }
    }
}
