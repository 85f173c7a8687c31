//! API Module
//!
//! HTTP handlers and routing for the edge node.
//!
//! # Endpoints
//! - `GET /health` - Liveness check
//! - `GET /_edge/stats` - Cache population snapshot
//! - `GET /{path}` - Any other path, served through the cache

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
