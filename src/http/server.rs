//! HTTP server setup and request handlers.
//!
//! # Responsibilities
//! - Create the axum Router with the API and static-asset routes
//! - Apply the response-header policy (no-store, CORS, HSTS) to API routes
//! - Hold the built directory for the process lifetime
//! - Serve until shutdown
//!
//! # Design Decisions
//! - The directory arrives fully built; nothing here merges, decodes, or
//!   validates. Handlers are read-only accessors
//! - `/ping` is kept alongside `/api/ping` for older probing clients
//! - Header policy is a tower layer on the API sub-router so the static
//!   bundle keeps its own caching behavior

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tower_http::{
    services::ServeDir, set_header::SetResponseHeaderLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Settings;
use crate::directory::EndpointDirectory;
use crate::http::first_request::FirstRequestGate;

/// Per-request timeout for all routes.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Directory built at startup; read-only from here on.
    pub directory: Arc<EndpointDirectory>,
    /// Region code of this deployment.
    pub region: String,
    /// Gate for the one-shot `X-First-Request` marker, shared by both
    /// ping routes.
    pub first_request: Arc<FirstRequestGate>,
}

/// HTTP server for one regional deployment.
pub struct AppServer {
    router: Router,
}

impl AppServer {
    /// Assemble the router over a built directory.
    pub fn new(directory: EndpointDirectory, settings: &Settings) -> Self {
        let state = AppState {
            directory: Arc::new(directory),
            region: settings.region.clone(),
            first_request: Arc::new(FirstRequestGate::new()),
        };
        let router = build_router(state, settings.asset_dir.clone());
        Self { router }
    }

    /// Run the server on the given listener until ctrl-c.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the axum router: API routes under the header policy, the static
/// bundle for everything else.
fn build_router(state: AppState, asset_dir: PathBuf) -> Router {
    let api = Router::new()
        .route("/api/endpoints", get(endpoints_handler))
        .route("/api/ping", get(ping_handler))
        // Older clients probe /ping without the /api prefix.
        .route("/ping", get(ping_handler))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-store"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::ACCESS_CONTROL_ALLOW_ORIGIN,
            HeaderValue::from_static("*"),
        ))
        .layer(SetResponseHeaderLayer::overriding(
            header::STRICT_TRANSPORT_SECURITY,
            HeaderValue::from_static("max-age=3600; includeSubdomains; preload"),
        ))
        .with_state(state);

    Router::new()
        .merge(api)
        .fallback_service(ServeDir::new(asset_dir))
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(TraceLayer::new_for_http())
}

/// `GET /api/endpoints`: the full directory as a JSON object keyed by
/// region code.
async fn endpoints_handler(State(state): State<AppState>) -> Response {
    match serde_json::to_string(state.directory.as_ref()) {
        Ok(body) => (
            [(header::CONTENT_TYPE, "application/json;charset=utf-8")],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize endpoint directory");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// `GET /api/ping` and `GET /ping`: the configured region code, one line.
async fn ping_handler(State(state): State<AppState>) -> Response {
    let mut response = format!("{}\n", state.region).into_response();
    if state.first_request.claim() {
        response
            .headers_mut()
            .insert("x-first-request", HeaderValue::from_static("true"));
    }
    response
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install Ctrl+C handler");
    tracing::info!("Shutdown signal received");
}
