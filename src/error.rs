//! Error types and handling infrastructure for policy-navigator.
//!
//! Library code returns [`NavigatorError`] through the crate-wide [`Result`] alias; the binary
//! wraps these with `anyhow` for context.
//!
//! Note that a payload the client cannot make sense of is *not* an error. The response
//! normalizer always falls back to a fixed phrase, so only transport, configuration and terminal
//! failures surface here.

use thiserror::Error;

/// User-facing message shown whenever a query fails, whatever the underlying cause.
pub const QUERY_FAILED_MESSAGE: &str = "Failed to process query. Please try again.";

/// The main error type for policy-navigator operations.
#[derive(Error, Debug)]
pub enum NavigatorError {
    /// The request never produced a usable response (connection, timeout, body decoding)
    #[error("Transport failed: {message}")]
    Transport {
        message: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The service answered with a non-success status code
    #[error("Service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// Configuration related errors
    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    /// UI and terminal related errors
    #[error("UI operation failed: {message}")]
    UIError { message: String },

    /// Terminal or file I/O failures
    #[error("I/O operation failed: {0}")]
    Io(#[from] std::io::Error),

    /// Generic error for cases not covered by specific variants
    #[error("Operation failed: {message}")]
    Other { message: String },
}

/// Standard Result type for policy-navigator operations.
pub type Result<T> = std::result::Result<T, NavigatorError>;

impl NavigatorError {
    /// Create a Transport error with a descriptive message and no underlying source
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
            source: None,
        }
    }

    /// Create a ConfigError with a descriptive message
    pub fn config(message: impl Into<String>) -> Self {
        Self::ConfigError {
            message: message.into(),
        }
    }

    /// Create a UIError with a descriptive message
    pub fn ui(message: impl Into<String>) -> Self {
        Self::UIError {
            message: message.into(),
        }
    }

    /// Create a generic Other error with a descriptive message
    pub fn other(message: impl Into<String>) -> Self {
        Self::Other {
            message: message.into(),
        }
    }

    /// Whether the failure happened while talking to the service
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport { .. } | Self::Status { .. })
    }
}

impl From<reqwest::Error> for NavigatorError {
    fn from(err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            "could not connect to service".to_string()
        } else if err.is_decode() {
            "response body was not valid JSON".to_string()
        } else {
            err.to_string()
        };

        Self::Transport {
            message,
            source: Some(err),
        }
    }
}
