use anyhow::Result;
use std::net::SocketAddr;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use polyglow_backend::{app, AppState, Config};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("polyglow_backend=debug,polyglow_server=debug,tower_http=debug")),
        )
        .init();

    let (config, source) = Config::discover(&Config::default_paths())?;
    match source {
        Some(path) => info!("Loaded configuration from: {}", path),
        None => info!("No configuration file found, using defaults"),
    }

    if !config.upstream.has_api_key() {
        warn!(
            "{} is not set; upstream requests will be rejected by the provider",
            polyglow_backend::config::API_KEY_ENV
        );
    }

    let host: std::net::IpAddr = config
        .server
        .host
        .parse()
        .map_err(|e| anyhow::anyhow!("server.host must be an IP address: {}", e))?;
    let addr = SocketAddr::new(host, config.server.port);

    let app = app(AppState::new(config));

    info!("Starting server on http://{}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
