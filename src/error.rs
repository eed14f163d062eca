//! Error taxonomy for the fire-risk pipeline.
//!
//! Every variant is recoverable: a failed poll cycle or settings edit leaves
//! the previously displayed data and the active thresholds untouched.

use thiserror::Error;

// ---

/// Errors surfaced by parsing, fetching and threshold updates.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FireWatchError {
    // ---
    /// Upstream answered with a non-2xx status, or the request never completed.
    #[error("API request failed{}: {message}", status_suffix(.status_code))]
    ApiRequestFailed {
        status_code: Option<u16>,
        message: String,
    },

    /// Upstream JSON did not have the expected shape.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Upstream returned a well-formed but empty result set.
    #[error("Empty result: {0}")]
    EmptyResult(String),

    /// User supplied input could not be accepted.
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

fn status_suffix(status_code: &Option<u16>) -> String {
    status_code
        .map(|code| format!(" (HTTP {code})"))
        .unwrap_or_default()
}

impl FireWatchError {
    /// Short machine-readable kind, used in JSON error bodies.
    pub fn kind(&self) -> &'static str {
        // ---
        match self {
            Self::ApiRequestFailed { .. } => "api_request_failed",
            Self::MalformedResponse(_) => "malformed_response",
            Self::EmptyResult(_) => "empty_result",
            Self::InvalidInput(_) => "invalid_input",
        }
    }
}

impl From<reqwest::Error> for FireWatchError {
    fn from(err: reqwest::Error) -> Self {
        // ---
        // Request URLs carry the API key in their query string
        let err = err.without_url();
        let message = if err.is_timeout() {
            format!("request timed out: {err}")
        } else if err.is_connect() {
            format!("connection failed: {err}")
        } else {
            err.to_string()
        };

        FireWatchError::ApiRequestFailed {
            status_code: err.status().map(|s| s.as_u16()),
            message,
        }
    }
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, FireWatchError>;
