//! Error types shared across the crate.
//!
//! Authentication-classed failures never show up here as "errors to handle":
//! the guard and the interceptor deal with them before anything reaches a
//! caller. What remains is either local to the session machinery
//! (`SessionError`) or local to the view that issued a request (`ApiError`).

use std::io;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures of the session plumbing itself: storage backends, configuration
/// and logging setup.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Io(#[from] io::Error),

    #[error("serializing the user profile failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid configuration: {0}")]
    Config(Box<figment::Error>),

    #[error("invalid logging.{field} '{value}'")]
    Logging { field: &'static str, value: String },

    #[error("file store is configured without a path")]
    MissingStorePath,
}

impl From<figment::Error> for SessionError {
    fn from(e: figment::Error) -> Self {
        SessionError::Config(Box::new(e))
    }
}

/// Failures of a single API call, surfaced to the view that issued it.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The server rejected the credential. The session has already been torn
    /// down by the time a caller sees this.
    #[error("the server rejected the session credential")]
    Unauthorized,

    #[error("request failed with {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Validation(String),

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("unexpected response body: {0}")]
    Decode(String),

    #[error(transparent)]
    Io(#[from] io::Error),

    #[error(transparent)]
    Session(#[from] SessionError),
}

impl ApiError {
    /// True for the one failure class that ends the session.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}
