//! CLI error types with miette diagnostics.
//!
//! Maps `watchdeck_api::Error` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use watchdeck_api::Error as ApiError;
use watchdeck_config::ConfigError;

/// Exit codes for process termination.
pub mod exit_code {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────

    #[error("Could not reach the backend")]
    #[diagnostic(
        code(watchdeck::connection_failed),
        help(
            "Check that the backend is running and the URL is correct.\n\
             Override it with --api-url or WATCHDECK_API_URL."
        )
    )]
    ConnectionFailed {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(watchdeck::timeout),
        help("Increase the timeout with --timeout or check backend responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Resources ────────────────────────────────────────────────────

    #[error("{resource_type} '{identifier}' not found")]
    #[diagnostic(
        code(watchdeck::not_found),
        help("Run: watchdeck {list_command} to see what exists")
    )]
    NotFound {
        resource_type: String,
        identifier: String,
        list_command: String,
    },

    // ── API ──────────────────────────────────────────────────────────

    #[error("Backend error ({status}): {message}")]
    #[diagnostic(code(watchdeck::api_error))]
    Api { status: u16, message: String },

    #[error("Malformed response from the backend: {message}")]
    #[diagnostic(
        code(watchdeck::decode),
        help("The backend returned something this CLI version cannot decode.")
    )]
    Decode { message: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(watchdeck::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error(transparent)]
    #[diagnostic(code(watchdeck::config))]
    Config(#[from] ConfigError),

    // ── Internal / IO ────────────────────────────────────────────────

    #[error("{0}")]
    #[diagnostic(code(watchdeck::internal))]
    Internal(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }

    /// Attach resource context to a 404, passing every other error through.
    pub fn with_not_found(
        self,
        resource_type: &str,
        identifier: &str,
        list_command: &str,
    ) -> Self {
        match self {
            Self::Api { status: 404, .. } => Self::NotFound {
                resource_type: resource_type.into(),
                identifier: identifier.into(),
                list_command: list_command.into(),
            },
            other => other,
        }
    }
}

// ── ApiError → CliError mapping ──────────────────────────────────────

impl From<ApiError> for CliError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Timeout { timeout } => CliError::Timeout {
                seconds: timeout.as_secs(),
            },

            ApiError::Http {
                status,
                status_text,
                body,
            } => CliError::Api {
                status,
                message: if body.is_empty() { status_text } else { body },
            },

            ApiError::Transport(e) => CliError::ConnectionFailed {
                source: Box::new(e),
            },

            ApiError::Parse { message, body: _ } => CliError::Decode { message },

            ApiError::InvalidUrl(e) => CliError::Validation {
                field: "api-url".into(),
                reason: e.to_string(),
            },

            ApiError::Unexpected(message) => CliError::Internal(message),
        }
    }
}
