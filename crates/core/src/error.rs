//! Error types for the Drift client.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Transport failures live in their own bounded-context enum.

use thiserror::Error;

/// The top-level error type for all Drift client operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Transport errors ---
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// The transport failure behind this error, if any.
    pub fn as_transport(&self) -> Option<&TransportError> {
        match self {
            Self::Transport(e) => Some(e),
            _ => None,
        }
    }
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures of a single request against the routing service.
///
/// None of these are retried locally; callers decide what to do with them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// No response arrived within the configured timeout. The in-flight
    /// request has been dropped.
    #[error("Request timed out after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    /// The response body was not JSON, not an envelope, or its payload did
    /// not match the expected shape.
    #[error("Malformed response: {0}")]
    Protocol(String),

    /// The service rejected the request, either through a non-2xx status or
    /// an envelope with `success: false`.
    #[error("{message}")]
    Request { status: u16, message: String },

    /// The connection failed before any response was received.
    #[error("Network error: {0}")]
    Network(String),
}

impl TransportError {
    /// Message used when a failed envelope carries no `error.message`.
    pub fn status_message(status: u16) -> String {
        format!("Request failed with status {status}")
    }

    /// HTTP status of a rejected request.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout { .. })
    }
}
