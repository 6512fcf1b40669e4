// ABOUTME: Error taxonomy for engine backends.
// ABOUTME: A plain backend error and a request error carrying status code and details.

use serde_json::Value;
use std::fmt;
use std::time::Duration;

/// Status reported when the engine socket cannot be reached.
pub const STATUS_UNAVAILABLE: u16 = 503;
/// Status reported when a request exceeds its timeout.
pub const STATUS_TIMEOUT: u16 = 504;
/// Status reported when the engine answers with a body we cannot decode.
pub const STATUS_MALFORMED: u16 = 502;

/// Errors from engine backend operations.
///
/// Callers tell "not found" apart from other failures through
/// [`BackendError::status_code`], never through the message text.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// Failure that is not tied to an engine round trip.
    #[error("{message}")]
    Backend { message: String },

    /// Failure of a request sent to the engine (or one that never got there).
    #[error("{message}")]
    Request {
        message: String,
        status_code: u16,
        details: ErrorDetails,
    },
}

/// Extra context attached to a request error.
#[derive(Debug, Clone, PartialEq)]
pub enum ErrorDetails {
    /// Error body decoded as JSON.
    Json(Value),
    /// Error body that was not JSON (or a body that failed to decode).
    Text(String),
    /// Underlying transport failure.
    Cause(String),
    None,
}

impl BackendError {
    pub fn backend(message: impl Into<String>) -> Self {
        BackendError::Backend {
            message: message.into(),
        }
    }

    pub fn request(message: impl Into<String>, status_code: u16, details: ErrorDetails) -> Self {
        BackendError::Request {
            message: message.into(),
            status_code,
            details,
        }
    }

    /// Socket-level failure (refused, reset, missing socket file).
    pub fn unavailable(socket: impl fmt::Display, cause: impl fmt::Display) -> Self {
        Self::request(
            format!("cannot reach engine at {}: {}", socket, cause),
            STATUS_UNAVAILABLE,
            ErrorDetails::Cause(cause.to_string()),
        )
    }

    pub fn timeout(after: Duration) -> Self {
        Self::request(
            format!("engine request timed out after {}ms", after.as_millis()),
            STATUS_TIMEOUT,
            ErrorDetails::None,
        )
    }

    /// Engine answered successfully but the body is not what the operation expects.
    pub fn malformed(what: impl fmt::Display, body: impl Into<String>) -> Self {
        Self::request(
            format!("malformed engine response: {}", what),
            STATUS_MALFORMED,
            ErrorDetails::Text(body.into()),
        )
    }

    pub fn message(&self) -> &str {
        match self {
            BackendError::Backend { message } | BackendError::Request { message, .. } => message,
        }
    }

    pub fn status_code(&self) -> Option<u16> {
        match self {
            BackendError::Backend { .. } => None,
            BackendError::Request { status_code, .. } => Some(*status_code),
        }
    }

    pub fn details(&self) -> Option<&ErrorDetails> {
        match self {
            BackendError::Backend { .. } => None,
            BackendError::Request { details, .. } => Some(details),
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status_code() == Some(404)
    }
}
