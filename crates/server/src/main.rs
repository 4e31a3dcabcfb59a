//! sortstash server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::providers::{Env, Format, Toml};
use figment::Figment;
use sortstash_core::config::AppConfig;
use sortstash_server::{create_router, AppState};
use std::net::SocketAddr;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// sortstash - authenticated per-user integer array service
#[derive(Parser, Debug)]
#[command(name = "sortstashd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "SORTSTASH_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Args::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Startup banner
    tracing::info!("sortstash v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration. The file is optional: every field has a default,
    // and SORTSTASH_ env vars can provide or override anything.
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();

    if config_path.exists() {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}, using defaults", args.config);
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("SORTSTASH_").split("__"))
        .extract()
        .context("failed to load configuration")?;

    // Initialize the data store; schema is created on first startup.
    let store = sortstash_store::from_config(&config.store)
        .await
        .context("failed to initialize data store")?;
    tracing::info!("Data store initialized");

    // Verify store connectivity before accepting requests. This catches
    // configuration errors early, preventing the server from reporting
    // healthy when the database is unusable.
    store
        .health_check()
        .await
        .context("data store health check failed")?;
    tracing::info!("Data store connectivity verified");

    // Create application state and router
    let state = AppState::new(config.clone(), store);
    let app = create_router(state);

    // Parse bind address
    let addr: SocketAddr = config.server.bind.parse().context("invalid bind address")?;

    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind to {addr}"))?;
    axum::serve(listener, app).await?;

    Ok(())
}
