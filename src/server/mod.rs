//! HTTP server.
//!
//! Provides REST API endpoints for:
//! - Triggering scans (manual and scheduled)
//! - Listing recently discovered tools and discovery stats
//! - Subscribing to digests
//! - Health checks

mod error;
mod handlers;

pub use error::{ApiError, ApiResult};
pub use handlers::{
    CronResponse, ScanResponse, SubscribeRequest, SubscribeResponse, ToolsResponse,
    RECENT_TOOLS_LIMIT,
};

use crate::pipeline::Pipeline;
use crate::storage::Store;
use axum::routing::{get, post};
use axum::Router;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::info;

/// Server state shared across handlers.
pub struct AppState {
    /// Tool and subscriber store.
    pub store: Arc<dyn Store>,
    /// Discovery pipeline.
    pub pipeline: Arc<Pipeline>,
    /// Bearer secret required by the scheduled trigger, if any.
    pub cron_secret: Option<String>,
}

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/api/scan", post(handlers::scan))
        .route("/api/cron", get(handlers::cron).post(handlers::cron))
        .route("/api/tools", get(handlers::tools))
        .route("/api/stats", get(handlers::stats))
        .route("/api/subscribe", post(handlers::subscribe))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the HTTP server and serve until the process is stopped.
pub async fn run_server(state: Arc<AppState>, addr: &str) -> std::io::Result<()> {
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("toolwatch listening on {addr}");

    axum::serve(listener, app).await
}
