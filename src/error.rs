//! Error handling for the snapshot relay

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Missing required settings
    #[error("Config error: {0}")]
    Config(String),

    /// Controller login rejected or returned no usable token
    #[error("Auth error: {0}")]
    Auth(String),

    /// All authentication modes exhausted for a GET
    #[error("Request to {url} failed: {detail}")]
    Request { url: String, detail: String },

    /// No directory endpoint yielded any camera
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// Both snapshot endpoints failed
    #[error("Snapshot retrieval error: {0}")]
    Retrieval(String),

    /// Chat relay failure
    #[error("Relay error: {0}")]
    Relay(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Forbidden (webhook token mismatch)
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// HTTP client error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, error_code, message) = match &self {
            Error::Config(msg) => (StatusCode::INTERNAL_SERVER_ERROR, "CONFIG_ERROR", msg.clone()),
            Error::Auth(msg) => (StatusCode::BAD_GATEWAY, "AUTH_ERROR", msg.clone()),
            Error::Request { url, detail } => (
                StatusCode::BAD_GATEWAY,
                "REQUEST_ERROR",
                format!("{}: {}", url, detail),
            ),
            Error::Discovery(msg) => (StatusCode::BAD_GATEWAY, "DISCOVERY_ERROR", msg.clone()),
            Error::Retrieval(msg) => (StatusCode::BAD_GATEWAY, "RETRIEVAL_ERROR", msg.clone()),
            Error::Relay(msg) => (StatusCode::BAD_GATEWAY, "RELAY_ERROR", msg.clone()),
            Error::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            Error::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
            Error::Serialization(e) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "SERIALIZATION_ERROR",
                e.to_string(),
            ),
            Error::Http(e) => (StatusCode::BAD_GATEWAY, "HTTP_ERROR", e.to_string()),
            Error::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                msg.clone(),
            ),
        };

        tracing::error!(
            status = %status,
            error_code = %error_code,
            message = %message,
            "Request error"
        );

        let body = Json(json!({
            "error_code": error_code,
            "message": message
        }));

        (status, body).into_response()
    }
}
