use std::time::Duration;

use thiserror::Error;

/// Top-level error type for the `watchdeck-api` crate.
///
/// Covers every failure mode of the request executor. Domain clients add
/// nothing on top -- failures bubble unchanged to the polling layer, which
/// is the sole recovery boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The request exceeded its configured timeout. The in-flight transport
    /// future was cancelled; it can never also resolve successfully.
    #[error("Request timed out after {}ms", timeout.as_millis())]
    Timeout { timeout: Duration },

    /// Non-2xx response. The body was parsed before the ok check, so error
    /// payloads from the backend are preserved here verbatim.
    #[error("HTTP {status} {status_text}")]
    Http {
        status: u16,
        status_text: String,
        body: String,
    },

    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// Malformed JSON in a response that declared a JSON content-type.
    #[error("Malformed JSON payload: {message}")]
    Parse { message: String, body: String },

    /// Endpoint path could not be joined onto the base URL.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Fallback for failures outside the recognized kinds.
    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Returns `true` if this is a transient error worth surfacing as
    /// "retry later" rather than a hard failure.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Timeout { .. } => true,
            Self::Transport(e) => e.is_timeout() || e.is_connect(),
            Self::Http { status, .. } => *status == 503 || *status == 429,
            _ => false,
        }
    }

    /// Returns `true` if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::Http { status: 404, .. })
    }

    /// HTTP status code, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            Self::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
