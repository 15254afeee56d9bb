//! Error types for the Livy client

use thiserror::Error;

/// Errors that can occur when talking to a Livy server
#[derive(Error, Debug)]
pub enum Error {
    /// A request parameter was rejected before anything was sent
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The server answered with a non-success status code.
    ///
    /// Anything above 201 counts as a failure, including redirects and
    /// 204 No Content. The response body is preserved so callers can
    /// inspect Livy's JSON error payload.
    #[error("{reason}")]
    Remote {
        /// HTTP status code
        status: u16,
        /// Canonical reason phrase for the status (e.g. "Not Found")
        reason: String,
        /// Response body as received from the server
        body: String,
    },

    /// Network or connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// TLS/SSL error
    #[error("TLS error: {0}")]
    Tls(String),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// HTTP status code of a rejected response, if this error came from one
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Response body of a rejected response, if this error came from one
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::Remote { body, .. } => Some(body),
            _ => None,
        }
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;
