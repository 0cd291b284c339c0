//! Error types for the heroes API

use thiserror::Error;

/// Failure talking to the remote endpoint
///
/// The display text is what ends up in the user-facing message log, so the
/// status variant renders as the bare status line (`404 Not Found`).
#[derive(Error, Debug)]
pub enum TransportError {
    /// Non-2xx response from the server
    #[error("{status}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// Connection, timeout or protocol error from the HTTP client
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// Response body could not be decoded into the expected shape
    #[error("invalid response body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Caller invoked an operation with arguments it can never accept
///
/// These are programming mistakes, not environmental failures, so they are
/// returned to the call site instead of being folded into a fallback.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("{operation} requires a hero with an id")]
    MissingId { operation: &'static str },
}
