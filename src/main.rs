//! Region Ping Service
//!
//! Each regional deployment of this service answers two questions for
//! latency-probing clients: "which region am I talking to" and "which other
//! regional deployments exist".
//!
//! # Architecture Overview
//!
//! ```text
//!                    ┌──────────────────────────────────────────────┐
//!                    │                 REGIONPING                    │
//!                    │                                               │
//!   startup          │  ┌───────────────┐      ┌─────────────────┐  │
//!   ─────────────────┼─▶│ control_plane │─────▶│   directory     │  │
//!                    │  │ (list call)   │      │ decode + build  │  │
//!                    │  └───────────────┘      └────────┬────────┘  │
//!                    │                                   │           │
//!                    │                                   ▼           │
//!   GET /api/ping    │  ┌───────────────────────────────────────┐   │
//!   GET /api/endpoints──▶│         http (axum router)           │   │
//!   GET /* (assets)  │  │  directory is read-only from here on  │   │
//!                    │  └───────────────────────────────────────┘   │
//!                    └──────────────────────────────────────────────┘
//! ```
//!
//! The directory is built exactly once, before the listener binds; a failed
//! build aborts startup rather than serving an incomplete directory.

use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use regionping::config;
use regionping::control_plane::CloudRunClient;
use regionping::directory::build_directory;
use regionping::http::AppServer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "regionping=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("regionping v0.1.0 starting");

    let settings = config::load_from_env()?;

    tracing::info!(
        port = settings.port,
        region = %settings.region,
        project = %settings.project,
        asset_dir = %settings.asset_dir.display(),
        "Configuration loaded"
    );

    // Build the endpoint directory before anything listens. The build has no
    // retry of its own, so the startup deadline bounds a hung control plane.
    let client = CloudRunClient::new();
    let build = build_directory(
        &client,
        &settings.project,
        settings.global_endpoint.as_deref(),
    );
    let directory = match tokio::time::timeout(settings.startup_timeout(), build).await {
        Ok(Ok(directory)) => directory,
        Ok(Err(e)) => {
            tracing::error!(error = %e, "Failed to build endpoint directory");
            return Err(e.into());
        }
        Err(_) => {
            tracing::error!(
                timeout_secs = settings.startup_timeout_secs,
                "Endpoint directory build missed the startup deadline"
            );
            return Err("endpoint directory build missed the startup deadline".into());
        }
    };

    tracing::info!(endpoints = directory.len(), "Endpoint directory ready");

    let listener = TcpListener::bind(("0.0.0.0", settings.port)).await?;
    tracing::info!(
        address = %listener.local_addr()?,
        "Listening for connections"
    );

    let server = AppServer::new(directory, &settings);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
