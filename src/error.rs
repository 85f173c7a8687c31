//! Error types for the edge cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Config Error Enum ==
/// Startup configuration failures. Always fatal, never seen at request time.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// `ORIGIN_URL` was not set or was empty
    #[error("ORIGIN_URL environment variable required")]
    MissingOriginUrl,

    /// `ORIGIN_URL` could not be parsed as an http(s) URL
    #[error("Invalid origin URL '{url}': {reason}")]
    InvalidOriginUrl { url: String, reason: String },

    /// A numeric or boolean setting could not be parsed
    #[error("Invalid value '{value}' for {name}")]
    InvalidValue { name: &'static str, value: String },

    /// The origin HTTP client could not be constructed
    #[error("Failed to build origin HTTP client: {0}")]
    HttpClient(String),
}

// == Edge Error Enum ==
/// Request-time failures of the cache-aside path.
///
/// A cache miss is not an error; only origin failures end up here.
#[derive(Error, Debug)]
pub enum EdgeError {
    /// The origin could not be reached or did not answer
    #[error("Origin server error: {0}")]
    OriginUnavailable(String),

    /// The origin answered but its body could not be read
    #[error("Origin read error: {0}")]
    OriginReadError(String),
}

impl EdgeError {
    /// HTTP status the error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            EdgeError::OriginUnavailable(_) => StatusCode::BAD_GATEWAY,
            EdgeError::OriginReadError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for EdgeError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(ErrorResponse::new(self.to_string()));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for request handling.
pub type Result<T> = std::result::Result<T, EdgeError>;
