//! Configuration Module
//!
//! Handles loading and validating edge node configuration from environment variables.

use std::env;
use std::time::Duration;

use reqwest::header::HeaderValue;
use reqwest::Url;

use crate::error::ConfigError;

/// Upper bound for any configured duration, one year
pub const MAX_DURATION_SECS: u64 = 365 * 24 * 60 * 60;

/// Edge node configuration parameters.
///
/// Only the origin URL is required; everything else has a default.
#[derive(Debug, Clone)]
pub struct Config {
    /// Origin base URL, without a trailing slash
    pub origin_url: String,
    /// HTTP server port
    pub server_port: u16,
    /// Global TTL in seconds applied to every cached entry
    pub cache_ttl: u64,
    /// Background sweep interval in seconds
    pub sweep_interval: u64,
    /// Origin request deadline in seconds, 0 = no deadline
    pub origin_timeout: u64,
    /// Identity reported in `X-CDN-Server` and hit annotations
    pub node_id: String,
    /// Whether JSON hits are annotated with provenance fields
    pub annotate_hits: bool,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `ORIGIN_URL` - Origin base URL (required)
    /// - `SERVER_PORT` - HTTP server port (default: 8081)
    /// - `CACHE_TTL_SECS` - Entry TTL in seconds (default: 60)
    /// - `SWEEP_INTERVAL_SECS` - Sweep frequency in seconds (default: 30)
    /// - `ORIGIN_TIMEOUT_SECS` - Origin deadline in seconds, 0 disables (default: 30)
    /// - `NODE_ID` - Node identity, must be a valid header value (default: "edge-server")
    ///
    /// Durations are limited to [`MAX_DURATION_SECS`].
    /// - `ANNOTATE_HITS` - Annotate JSON hits (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds a Config from an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let origin_url = lookup("ORIGIN_URL")
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .ok_or(ConfigError::MissingOriginUrl)?;

        let defaults = Self::with_origin(String::new());

        let config = Self {
            origin_url: normalize_origin(&origin_url)?,
            server_port: parse_var(&lookup, "SERVER_PORT", defaults.server_port)?,
            cache_ttl: parse_var(&lookup, "CACHE_TTL_SECS", defaults.cache_ttl)?,
            sweep_interval: parse_var(&lookup, "SWEEP_INTERVAL_SECS", defaults.sweep_interval)?,
            origin_timeout: parse_var(&lookup, "ORIGIN_TIMEOUT_SECS", defaults.origin_timeout)?,
            node_id: lookup("NODE_ID")
                .filter(|v| !v.is_empty())
                .unwrap_or(defaults.node_id),
            annotate_hits: parse_var(&lookup, "ANNOTATE_HITS", defaults.annotate_hits)?,
        };

        check_duration("CACHE_TTL_SECS", config.cache_ttl, 1)?;
        check_duration("SWEEP_INTERVAL_SECS", config.sweep_interval, 1)?;
        check_duration("ORIGIN_TIMEOUT_SECS", config.origin_timeout, 0)?;

        // Sent verbatim in X-CDN-Server
        if HeaderValue::from_str(&config.node_id).is_err() {
            return Err(ConfigError::InvalidValue {
                name: "NODE_ID",
                value: config.node_id,
            });
        }

        Ok(config)
    }

    /// Config with default settings for the given origin.
    pub fn with_origin(origin_url: impl Into<String>) -> Self {
        Self {
            origin_url: origin_url.into(),
            server_port: 8081,
            cache_ttl: 60,
            sweep_interval: 30,
            origin_timeout: 30,
            node_id: "edge-server".to_string(),
            annotate_hits: true,
        }
    }

    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.cache_ttl)
    }

    pub fn sweep_period(&self) -> Duration {
        Duration::from_secs(self.sweep_interval)
    }

    /// Origin deadline, `None` when disabled.
    pub fn origin_deadline(&self) -> Option<Duration> {
        (self.origin_timeout > 0).then(|| Duration::from_secs(self.origin_timeout))
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(name) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue { name, value }),
        None => Ok(default),
    }
}

fn check_duration(name: &'static str, secs: u64, min: u64) -> Result<(), ConfigError> {
    if (min..=MAX_DURATION_SECS).contains(&secs) {
        Ok(())
    } else {
        Err(ConfigError::InvalidValue {
            name,
            value: secs.to_string(),
        })
    }
}

fn normalize_origin(raw: &str) -> Result<String, ConfigError> {
    let url = Url::parse(raw).map_err(|e| ConfigError::InvalidOriginUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidOriginUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme '{}'", url.scheme()),
        });
    }

    Ok(raw.trim_end_matches('/').to_string())
}
