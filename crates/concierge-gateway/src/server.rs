//! Agent API HTTP server — Axum router, CORS policy, and lifecycle

use std::net::SocketAddr;

use axum::Json;
use axum::Router;
use axum::extract::State;
use axum::http::{HeaderValue, Method, StatusCode, Uri, header};
use axum::routing::{get, post};
use chrono::Utc;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use anyhow::{Context, Result};
use concierge_core::store::AgentStore;

use crate::agents;

/// Shared state for all request handlers
#[derive(Clone)]
pub struct GatewayState {
    pub store: AgentStore,
    pub start_time: std::time::Instant,
}

/// Browser origin policy for the API.
///
/// Permissive mode reflects any origin and suits local development. Strict
/// mode names exactly one allowed origin and enables credentialed requests,
/// which is what a deployed frontend needs.
#[derive(Debug, Clone)]
pub enum CorsPolicy {
    Permissive,
    Strict(HeaderValue),
}

impl CorsPolicy {
    /// Strict policy allowing only `origin`.
    pub fn strict(origin: &str) -> Result<Self> {
        let value = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("Invalid CORS origin '{}'", origin))?;
        Ok(Self::Strict(value))
    }

    fn layer(&self) -> CorsLayer {
        match self {
            CorsPolicy::Permissive => CorsLayer::permissive(),
            CorsPolicy::Strict(origin) => CorsLayer::new()
                .allow_origin(origin.clone())
                .allow_methods([
                    Method::GET,
                    Method::POST,
                    Method::PUT,
                    Method::DELETE,
                    Method::OPTIONS,
                ])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
                .allow_credentials(true),
        }
    }
}

/// The agent API server
pub struct GatewayServer {
    state: GatewayState,
    bind: SocketAddr,
    cors: CorsPolicy,
}

impl GatewayServer {
    /// Create a new server over an already-opened store.
    pub fn new(bind: SocketAddr, store: AgentStore, cors: CorsPolicy) -> Self {
        let state = GatewayState {
            store,
            start_time: std::time::Instant::now(),
        };
        Self { state, bind, cors }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/", get(root_handler))
            .route("/api/health", get(health_handler))
            .route(
                "/api/agents",
                get(agents::list_agents).post(agents::create_agent),
            )
            .route(
                "/api/agents/{id}",
                get(agents::get_agent)
                    .put(agents::update_agent)
                    .delete(agents::delete_agent),
            )
            .route("/api/agents/{id}/ask", post(agents::ask_agent))
            .fallback(unknown_endpoint)
            .layer(TraceLayer::new_for_http())
            .layer(self.cors.layer())
            .with_state(self.state.clone())
    }

    /// Start the server (blocks until a shutdown signal arrives)
    pub async fn run(self) -> Result<()> {
        let router = self.router();
        let listener = tokio::net::TcpListener::bind(self.bind).await?;
        info!("Agent API listening on {}", self.bind);

        axum::serve(listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        info!("Agent API shut down cleanly");
        Ok(())
    }
}

// ── HTTP Handlers ──

async fn root_handler() -> Json<Value> {
    Json(json!({
        "message": "Agent Management API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "health": "/api/health",
            "agents": "/api/agents",
            "documentation": "See README.md for complete API documentation"
        }
    }))
}

async fn health_handler(State(state): State<GatewayState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now(),
        "service": "Agent Management API",
        "uptime_secs": state.start_time.elapsed().as_secs(),
    }))
}

async fn unknown_endpoint(uri: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Endpoint not found",
            "path": uri.path(),
            "availableEndpoints": ["/api/health", "/api/agents"],
        })),
    )
}

#[cfg(unix)]
async fn shutdown_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigterm = match signal(SignalKind::terminate()) {
        Ok(sig) => sig,
        Err(e) => {
            warn!("Failed to install SIGTERM handler: {}", e);
            if let Err(e) = tokio::signal::ctrl_c().await {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            info!("Received ctrl-c, shutting down");
            return;
        }
    };

    tokio::select! {
        result = tokio::signal::ctrl_c() => {
            if let Err(e) = result {
                warn!("Failed to listen for ctrl-c: {}", e);
            }
            info!("Received ctrl-c, shutting down");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down");
        }
    }
}

#[cfg(not(unix))]
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for ctrl-c: {}", e);
    }
    info!("Received ctrl-c, shutting down");
}
