//! Error types for ScoopView
//!
//! Every failure the client can hit while talking to the curation API

use thiserror::Error;

/// Main error type for ScoopView operations
#[derive(Error, Debug)]
pub enum ScoopViewError {
    #[error("Remote API unavailable: {0}")]
    RemoteUnavailable(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Malformed response from {path}: {message}")]
    Decode { path: String, message: String },

    #[error("Invalid API base URL '{0}': {1}")]
    InvalidBaseUrl(String, String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Terminal error: {0}")]
    Terminal(String),
}

/// Result type alias for ScoopView operations
pub type Result<T> = std::result::Result<T, ScoopViewError>;

impl ScoopViewError {
    /// Build a transport error for a failed request to `path`
    pub fn from_http(path: &str, err: &reqwest::Error) -> Self {
        let detail = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "connection failed".to_string()
        } else {
            err.to_string()
        };
        ScoopViewError::RemoteUnavailable(format!("{}: {}", path, detail))
    }

    /// Build an error for a non-OK HTTP status on `path`
    pub fn from_status(path: &str, status: reqwest::StatusCode) -> Self {
        ScoopViewError::RemoteUnavailable(format!("{}: HTTP {}", path, status.as_u16()))
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ScoopViewError::NotFound(_))
    }

    /// Short text suitable for a status line or error placeholder
    pub fn user_message(&self) -> String {
        match self {
            ScoopViewError::RemoteUnavailable(msg) => format!("Search failed: {}", msg),
            ScoopViewError::NotFound(_) => "Topic not found".to_string(),
            ScoopViewError::Decode { .. } => "Unexpected response from server".to_string(),
            other => other.to_string(),
        }
    }
}
