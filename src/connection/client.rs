//! The two operations bound to a resolved connection.

use std::sync::Arc;

use axum::body::{Body, Bytes};
use axum::extract::Request;
use axum::http::{header, HeaderMap, Method, StatusCode};
use axum::response::Response;
use serde_json::Value;

use crate::forward::{self, decision, OutboundRequest, ResponseKind};
use crate::registry::ConnectionConfig;
use crate::relay::{self, RelayedResponse, RequestError};

/// Cap on the buffered inbound body for `pass`.
const MAX_INBOUND_BODY: usize = 2 * 1024 * 1024;

/// Header overrides for a single `post` call.
///
/// The forced JSON content headers always win over anything set here.
#[derive(Debug, Clone, Default)]
pub struct PostOptions {
    pub headers: HeaderMap,
}

/// A named backend target bound to its configuration.
///
/// Obtained from [`ConnectionRegistry::connection`]; cheap to create, one
/// per call site is fine.
///
/// [`ConnectionRegistry::connection`]: crate::registry::ConnectionRegistry::connection
#[derive(Debug, Clone)]
pub struct Connection {
    key: String,
    config: Arc<ConnectionConfig>,
    client: reqwest::Client,
}

impl Connection {
    pub(crate) fn new(key: String, config: Arc<ConnectionConfig>, client: reqwest::Client) -> Self {
        Self { key, config, client }
    }

    /// The registry key this connection was resolved under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Fire a buffered JSON POST against `url` (relative to the connection
    /// location).
    ///
    /// Resolves with a [`RelayedResponse`] on a 2xx status. Any other
    /// status, and any transport failure, rejects with [`RequestError`];
    /// the error's response is always populated.
    pub async fn post(
        &self,
        url: &str,
        payload: &Value,
        options: PostOptions,
    ) -> Result<RelayedResponse, RequestError> {
        tracing::debug!(connection = %self.key, url, "post");

        let body: Bytes = serde_json::to_vec(payload)
            .expect("serializing a serde_json::Value cannot fail")
            .into();

        let mut outbound = OutboundRequest {
            url: format!("{}{}", self.config.location(), url),
            method: Method::POST,
            headers: options.headers,
            body: None,
            response_kind: ResponseKind::Buffered,
        };
        decision::force_json_headers(&mut outbound.headers, body.len());
        outbound.body = Some(body);

        if let Some(hook) = self.config.before_post_hook() {
            hook(&mut outbound);
        }

        match self.build_request(outbound).send().await {
            Ok(upstream) => {
                let status = upstream.status();
                let headers = upstream.headers().clone();
                match upstream.bytes().await {
                    Ok(bytes) => {
                        let relayed = RelayedResponse::new(status, headers, bytes, url);
                        if status.is_success() {
                            Ok(relayed)
                        } else {
                            Err(RequestError::new(relayed))
                        }
                    }
                    Err(err) => Err(RequestError::synthetic(url, &err)),
                }
            }
            Err(err) => {
                tracing::debug!(connection = %self.key, url, error = %err, "post transport failure");
                Err(RequestError::synthetic(url, &err))
            }
        }
    }

    /// Forward an inbound request to the backend and stream the backend's
    /// response (or error response) back.
    ///
    /// The returned response *is* the outbound channel: status and headers
    /// are set on it and the body is a direct pipe from the upstream, so
    /// the server drives the copy with backpressure after this returns.
    /// Never fails; transport errors become a 500 with a textual body.
    pub async fn pass(&self, inbound: Request<Body>) -> Response {
        let (parts, body) = inbound.into_parts();
        let path_and_query = parts
            .uri
            .path_and_query()
            .map(|pq| pq.as_str())
            .unwrap_or_else(|| parts.uri.path());

        let mut outbound = OutboundRequest {
            url: format!("{}{}", self.config.location(), path_and_query),
            method: parts.method,
            headers: parts.headers,
            body: None,
            response_kind: ResponseKind::Streamed,
        };
        tracing::debug!(connection = %self.key, url = %outbound.url, "pass");

        if let Some(hook) = self.config.before_pass_hook() {
            hook(&mut outbound);
        }

        let raw = match axum::body::to_bytes(body, MAX_INBOUND_BODY).await {
            Ok(bytes) => bytes,
            Err(err) => {
                tracing::warn!(connection = %self.key, error = %err, "failed to read inbound body");
                return relay::text_response(
                    StatusCode::PAYLOAD_TOO_LARGE,
                    format!("failed to read request body: {err}"),
                );
            }
        };

        let content_type = outbound
            .headers
            .get(header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let plan = forward::plan(
            outbound.method.clone(),
            content_type.as_deref(),
            raw,
            self.config.is_json(),
        );
        plan.apply(&mut outbound);

        match self.build_request(outbound).send().await {
            Ok(upstream) => relay::relay_streamed(upstream),
            Err(err) => {
                tracing::error!(connection = %self.key, error = %err, "pass transport failure");
                relay::relay_transport_failure(&err)
            }
        }
    }

    fn build_request(&self, outbound: OutboundRequest) -> reqwest::RequestBuilder {
        let mut builder = self
            .client
            .request(outbound.method, outbound.url)
            .headers(outbound.headers);
        if let Some(body) = outbound.body {
            builder = builder.body(body);
        }
        builder
    }
}
