use anyhow::Context;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use catalog_api::{app, config, AppState};

#[derive(Debug, Parser)]
#[command(name = "catalog-api", version, about = "Multi-tenant products and variations API")]
struct ServeArgs {
    /// Bind address (overrides HOST)
    #[arg(long)]
    host: Option<String>,

    /// Bind port (overrides PORT)
    #[arg(long, short)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up STORE_BASE_URL etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = ServeArgs::parse();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting Catalog API in {:?} mode", config.environment);

    let state = AppState::from_config(config)?;
    let app = app(state, config);

    let host = args.host.unwrap_or_else(|| config.server.host.clone());
    let port = args.port.unwrap_or(config.server.port);
    let bind_addr = format!("{}:{}", host, port);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Catalog API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.context("server error")?;
    Ok(())
}
