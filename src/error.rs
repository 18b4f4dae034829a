//! Error types for the OpenSDS client
//!
//! Provides structured error types for the request path: configuration
//! loading, identity-service authentication, transport failures and
//! error responses returned by the storage service.

use thiserror::Error;

/// Unified error type for the client
#[derive(Error, Debug)]
pub enum Error {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    // =========================================================================
    // Authentication Errors
    // =========================================================================
    #[error("Authentication failed: {reason}")]
    Authentication { reason: String },

    // =========================================================================
    // API Errors
    // =========================================================================
    #[error("API error (HTTP {status}): {body}")]
    Api { status: u16, body: String },

    // =========================================================================
    // Transport Errors
    // =========================================================================
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    // =========================================================================
    // Parse Errors
    // =========================================================================
    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    // =========================================================================
    // IO Errors
    // =========================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// HTTP status reported by the remote service, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api { status, .. } => Some(*status),
            Error::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the storage service rejected the token
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// Check if the requested resource does not exist
    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }

    /// Check if this error is transient
    ///
    /// The client never retries on its own; callers use this to decide.
    pub fn is_transient(&self) -> bool {
        match self {
            Error::Transport(e) => e.is_timeout() || e.is_connect(),
            Error::Api { status, .. } => matches!(status, 429 | 502 | 503 | 504),
            _ => false,
        }
    }
}

/// Result type alias for the client
pub type Result<T> = std::result::Result<T, Error>;
