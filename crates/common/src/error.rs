//! Error types shared across the harness

use thiserror::Error;

/// Result type alias using the Storecheck Error
pub type Result<T> = std::result::Result<T, Error>;

/// Storecheck error taxonomy
///
/// The first six variants are the domain taxonomy the API client and page
/// abstractions report through; the rest is harness plumbing (driver
/// subprocess, timeouts, filesystem, JSON).
#[derive(Error, Debug)]
pub enum Error {
    #[error("transport unavailable: {0}")]
    Transport(String),

    #[error("authentication failed: {0}")]
    Authentication(String),

    #[error("{operation} rejected: invalid or stale token")]
    Authorization { operation: String },

    #[error("booking {id} not found")]
    NotFound { id: i64 },

    #[error("service reported failure inside a success response: {reason}")]
    ValidationMismatch { reason: String },

    #[error("invalid checkout transition: {from} -> {to}")]
    StateTransition { from: String, to: String },

    #[error("assertion failed: {0}")]
    Assertion(String),

    #[error("driver error: {0}")]
    Driver(String),

    #[error("timed out waiting for: {0}")]
    Timeout(String),

    #[error("unexpected status {status} from {operation}")]
    UnexpectedStatus { operation: String, status: u16 },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build a checkout transition error from the stages involved.
    pub fn state_transition(from: impl ToString, to: impl ToString) -> Self {
        Error::StateTransition {
            from: from.to_string(),
            to: to.to_string(),
        }
    }
}
