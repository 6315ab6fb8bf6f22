//! Inkfest server entry point
//!
//! Loads configuration, selects the storage backend, wires the registration
//! service and serves the REST API.

mod config;

use anyhow::Result;
use axum::routing::get;
use clap::Parser;
use registration_service::domain::{LogEventPublisher, Service};
use registration_service::infra::storage;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "inkfest-server", version, about = "Inkfest Server")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, short, default_value = "config/inkfest.yaml")]
    config: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let cfg = config::load(&args.config)?;

    let repos = storage::connect(&cfg.registration.storage).await?;
    let service = Arc::new(Service::new(
        repos.tokens,
        repos.requirements,
        repos.registrations,
        Arc::new(LogEventPublisher),
        cfg.registration.defaults(),
    ));

    let app = registration_service::api::rest::routes::router(service)
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(&cfg.bind_addr).await?;
    tracing::info!(addr = %cfg.bind_addr, "inkfest server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn healthz() -> &'static str {
    "ok"
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "failed to install shutdown signal handler");
    }
}
