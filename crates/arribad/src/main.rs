//! arribad - Instant On portal wrapper daemon
//!
//! Serves the browser-facing REST API and forwards calls to the Aruba
//! Instant On portal (or to a canned stub for local development).
//!
//! Usage:
//!   arribad [--config arriba.toml] [--port 8080] [--mock]

mod config;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use arriba_api::{create_router, AppState};
use arriba_client::{InstantOnClient, StubClient};
use arriba_core::VendorClient;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LogFormat};

const DEFAULT_FILTER: &str =
    "arribad=info,arriba_api=info,arriba_service=info,arriba_client=info,tower_http=info";

#[derive(Parser)]
#[command(name = "arribad")]
#[command(author, version, about = "Aruba Instant On portal wrapper")]
struct Args {
    /// Configuration file (TOML)
    #[arg(short, long, env = "ARRIBA_CONFIG")]
    config: Option<PathBuf>,

    /// Listen port
    #[arg(short, long)]
    port: Option<u16>,

    /// Listen address
    #[arg(long)]
    host: Option<String>,

    /// Serve canned data instead of calling the real portal
    #[arg(long, env = "ARRIBA_USE_MOCK")]
    mock: bool,

    /// Log output format
    #[arg(long, value_enum)]
    log_format: Option<LogFormat>,
}

impl Args {
    /// Apply command-line overrides on top of the file configuration
    fn apply(&self, mut config: Config) -> Config {
        if let Some(port) = self.port {
            config.server.port = port;
        }
        if let Some(host) = &self.host {
            config.server.host = host.clone();
        }
        if self.mock {
            config.use_mock = true;
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config
    }
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| DEFAULT_FILTER.into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json())
            .init(),
    }
}

fn vendor_client(config: &Config) -> anyhow::Result<Arc<dyn VendorClient>> {
    if config.use_mock {
        tracing::warn!(
            "Using stub vendor client - log in with {} / {}",
            arriba_client::STUB_EMAIL,
            arriba_client::STUB_PASSWORD
        );
        return Ok(Arc::new(StubClient::new()));
    }

    tracing::info!(
        auth_url = %config.vendor.auth_url,
        api_url = %config.vendor.api_url,
        "Using Instant On portal"
    );
    let client = InstantOnClient::with_config(&config.vendor.client_config())
        .context("Failed to create Instant On client")?;
    Ok(Arc::new(client))
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received Ctrl+C, shutting down"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.apply(Config::load(args.config.as_deref())?);

    init_tracing(config.log_format);
    tracing::info!("Starting arribad");
    if let Some(path) = &args.config {
        tracing::info!("Loaded config from: {}", path.display());
    }

    let client = vendor_client(&config)?;
    let state = AppState::new(client).with_environment(&config.environment);
    let app = create_router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    tracing::info!("Listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}
