//! Gateway binary: load config, build the registry, forward everything.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use http_relay::config::load_config;
use http_relay::gateway::{build_registry, GatewayServer, RouteTable};

#[derive(Parser)]
#[command(name = "http-relay")]
#[command(about = "HTTP forwarding gateway over a named connection registry", long_about = None)]
struct Cli {
    /// Path to the TOML configuration file.
    #[arg(short, long, default_value = "relay.toml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "http_relay=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        connections = config.connections.len(),
        routes = config.routes.len(),
        default_connection = %config.default_connection,
        "Configuration loaded"
    );

    let registry = build_registry(&config)?;
    let routes = RouteTable::from_config(&config);

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let server = GatewayServer::new(Arc::new(registry), routes);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
