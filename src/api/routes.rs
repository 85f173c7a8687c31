//! API Routes
//!
//! Configures the Axum router for the edge node.

use axum::{http::Method, routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{edge_handler, health_handler, stats_handler, AppState};

/// Path of the stats endpoint; kept under a prefix unlikely to clash with origin content.
pub const STATS_PATH: &str = "/_edge/stats";

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /health` - Liveness check
/// - `GET /_edge/stats` - Cache population snapshot
/// - everything else - cache-aside proxy to the origin
///
/// # Middleware
/// - CORS: Allows any origin for GET requests
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::HEAD])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_handler))
        .route(STATS_PATH, get(stats_handler))
        .fallback(edge_handler)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
