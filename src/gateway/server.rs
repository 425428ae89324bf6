//! Gateway HTTP server setup.
//!
//! # Responsibilities
//! - Build the registry and route table from validated config
//! - Create the axum Router with the catch-all forwarding handler
//! - Wire up middleware (tracing, request ID)
//! - Serve with graceful shutdown

use std::sync::Arc;

use axum::{
    body::Body,
    extract::{Request, State},
    http::{HeaderValue, StatusCode},
    response::Response,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::config::schema::GatewayConfig;
use crate::gateway::routes::RouteTable;
use crate::registry::{ConnectionRegistry, RegistryError};
use crate::relay;

const X_REQUEST_ID: &str = "x-request-id";

/// Application state injected into the forwarding handler.
#[derive(Clone)]
pub struct AppState {
    pub registry: Arc<ConnectionRegistry>,
    pub routes: Arc<RouteTable>,
}

/// Build a [`ConnectionRegistry`] from a validated gateway config.
pub fn build_registry(config: &GatewayConfig) -> Result<ConnectionRegistry, RegistryError> {
    let default_entry = config
        .connections
        .get(&config.default_connection)
        .ok_or_else(|| RegistryError::Unknown(config.default_connection.clone()))?;

    let mut registry = ConnectionRegistry::new(
        &config.default_connection,
        default_entry.to_connection_config(),
    )?;
    for (key, entry) in &config.connections {
        if key != &config.default_connection {
            registry.add_connection(key, entry.to_connection_config());
        }
    }
    Ok(registry)
}

/// HTTP server forwarding every request through the registry.
pub struct GatewayServer {
    router: Router,
}

impl GatewayServer {
    /// Create a new gateway server over a registry and route table.
    pub fn new(registry: Arc<ConnectionRegistry>, routes: RouteTable) -> Self {
        let state = AppState {
            registry,
            routes: Arc::new(routes),
        };

        let router = Router::new()
            .route("/{*path}", any(forward_handler))
            .route("/", any(forward_handler))
            .with_state(state)
            .layer(TraceLayer::new_for_http());

        Self { router }
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "gateway starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("gateway stopped");
        Ok(())
    }
}

/// Catch-all forwarding handler.
///
/// Attaches a request ID when absent, selects the connection by path
/// prefix, and streams the backend response back.
async fn forward_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    if !request.headers().contains_key(X_REQUEST_ID) {
        let id = Uuid::new_v4().to_string();
        if let Ok(value) = HeaderValue::from_str(&id) {
            request.headers_mut().insert(X_REQUEST_ID, value);
        }
    }
    let request_id = request
        .headers()
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .to_string();

    let key = state.routes.select(request.uri().path()).to_string();
    tracing::debug!(
        request_id = %request_id,
        connection = %key,
        method = %request.method(),
        path = %request.uri().path(),
        "forwarding request"
    );

    match state.registry.connection(Some(&key)) {
        Ok(connection) => connection.pass(request).await,
        Err(err) => {
            tracing::error!(
                request_id = %request_id,
                connection = %key,
                error = %err,
                "connection resolution failed"
            );
            relay::text_response(
                StatusCode::BAD_GATEWAY,
                format!("no usable connection for `{key}`"),
            )
        }
    }
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
