//! API Handlers
//!
//! HTTP request handlers for the edge node.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{HeaderName, CONTENT_TYPE},
        HeaderMap, HeaderValue, Method, StatusCode, Uri,
    },
    response::{IntoResponse, Response},
    Json,
};

use crate::cache::CacheStore;
use crate::config::Config;
use crate::coordinator::{annotate_hit, CacheAside, CacheSource};
use crate::error::{ConfigError, Result};
use crate::models::StatsResponse;
use crate::origin::{HttpOriginFetcher, OriginFetch};

/// `HIT` or `MISS`
pub const X_CACHE: HeaderName = HeaderName::from_static("x-cache");
/// TTL given to a freshly stored entry, sent on misses
pub const X_CACHE_TTL: HeaderName = HeaderName::from_static("x-cache-ttl");
/// Identity of the node that fetched from the origin, sent on misses
pub const X_CDN_SERVER: HeaderName = HeaderName::from_static("x-cdn-server");

/// Body returned by the liveness endpoint.
pub const HEALTH_BODY: &str = "Edge Server OK";

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Cache-aside coordinator over the shared store
    pub cache: CacheAside,
    /// Origin used on misses
    pub origin: Arc<dyn OriginFetch>,
    /// Identity used in `X-CDN-Server` and hit annotations
    pub node_id: String,
    /// Whether JSON hits get provenance fields
    pub annotate_hits: bool,
}

impl AppState {
    /// Creates a new AppState with default node settings.
    pub fn new(store: Arc<CacheStore>, origin: Arc<dyn OriginFetch>) -> Self {
        Self {
            cache: CacheAside::new(store),
            origin,
            node_id: "edge-server".to_string(),
            annotate_hits: true,
        }
    }

    /// Creates a new AppState from configuration, with an HTTP origin fetcher.
    pub fn from_config(
        config: &Config,
        store: Arc<CacheStore>,
    ) -> std::result::Result<Self, ConfigError> {
        let origin = HttpOriginFetcher::from_config(config)?;

        Ok(Self::new(store, Arc::new(origin))
            .with_node_id(config.node_id.clone())
            .with_annotation(config.annotate_hits))
    }

    pub fn with_node_id(mut self, node_id: impl Into<String>) -> Self {
        self.node_id = node_id.into();
        self
    }

    pub fn with_annotation(mut self, enabled: bool) -> Self {
        self.annotate_hits = enabled;
        self
    }

    pub fn store(&self) -> &Arc<CacheStore> {
        self.cache.store()
    }
}

/// Handler for every path not claimed by another route.
///
/// Serves the request path through the cache, fetching from the origin on
/// a miss. The query string is not part of the key.
pub async fn edge_handler(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
) -> Result<Response> {
    if method != Method::GET && method != Method::HEAD {
        return Ok(StatusCode::METHOD_NOT_ALLOWED.into_response());
    }

    let outcome = state.cache.handle(uri.path(), state.origin.as_ref()).await?;

    let mut headers = HeaderMap::new();
    headers.insert(X_CACHE, HeaderValue::from_static(outcome.source.as_str()));

    let mut payload = outcome.payload;
    match outcome.source {
        CacheSource::Hit => {
            if state.annotate_hits {
                if let Some(annotated) =
                    annotate_hit(&payload, &outcome.content_type, &state.node_id)
                {
                    payload = annotated;
                }
            }
        }
        CacheSource::Miss => {
            let ttl = format_ttl(state.store().ttl());
            if let Ok(value) = HeaderValue::from_str(&ttl) {
                headers.insert(X_CACHE_TTL, value);
            }
            if let Ok(value) = HeaderValue::from_str(&state.node_id) {
                headers.insert(X_CDN_SERVER, value);
            }
        }
    }

    if !outcome.content_type.is_empty() {
        if let Ok(value) = HeaderValue::from_str(&outcome.content_type) {
            headers.insert(CONTENT_TYPE, value);
        }
    }

    let mut response = Response::new(Body::from(payload));
    *response.headers_mut() = headers;
    Ok(response)
}

/// Handler for GET /_edge/stats
///
/// Returns a population snapshot of the store.
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let stats = state.store().stats().await;
    Json(StatsResponse::new(stats))
}

/// Handler for GET /health
///
/// Liveness only; does not touch the store.
pub async fn health_handler() -> &'static str {
    HEALTH_BODY
}

/// Formats a TTL for the `X-Cache-TTL` header, e.g. `60s`.
pub fn format_ttl(ttl: Duration) -> String {
    if ttl.subsec_millis() == 0 {
        format!("{}s", ttl.as_secs())
    } else {
        format!("{}ms", ttl.as_millis())
    }
}
