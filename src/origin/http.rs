//! HTTP Origin Fetcher
//!
//! `reqwest`-backed origin client. One GET per miss, no retries.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, Client};
use tracing::{debug, warn};

use super::{OriginFetch, OriginResponse};
use crate::config::Config;
use crate::error::{ConfigError, EdgeError, Result};

/// Fetches paths relative to a single origin base URL.
#[derive(Debug, Clone)]
pub struct HttpOriginFetcher {
    client: Client,
    base_url: String,
}

impl HttpOriginFetcher {
    /// Creates a fetcher for `base_url` with an optional request deadline.
    pub fn new(base_url: impl Into<String>, timeout: Option<Duration>) -> std::result::Result<Self, ConfigError> {
        let mut builder = Client::builder()
            .user_agent(format!("edge-cache/{}", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Creates a fetcher from the origin settings in `config`.
    pub fn from_config(config: &Config) -> std::result::Result<Self, ConfigError> {
        Self::new(config.origin_url.clone(), config.origin_deadline())
    }

    fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl OriginFetch for HttpOriginFetcher {
    async fn fetch(&self, path: &str) -> Result<OriginResponse> {
        let url = self.url_for(path);
        debug!("Origin: GET {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            warn!("Origin: request to {} failed: {}", url, e);
            EdgeError::OriginUnavailable(e.to_string())
        })?;

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let body = response.bytes().await.map_err(|e| {
            warn!("Origin: reading body from {} failed: {}", url, e);
            EdgeError::OriginReadError(e.to_string())
        })?;

        Ok(OriginResponse { body, content_type })
    }
}
