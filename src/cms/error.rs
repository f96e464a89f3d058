//! Typed errors for the content API boundary

use thiserror::Error;

/// Failures while talking to the content repository.
///
/// Pagination and detail resolution return these instead of panicking or
/// swallowing the failure, so callers can decide between retrying, a 404
/// page or a gateway error.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level failure (connect, timeout, TLS, body read)
    #[error("content request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("content API returned {code}: {body}")]
    Status {
        code: reqwest::StatusCode,
        body: String,
    },

    /// The requested document does not exist
    #[error("document not found: {uid}")]
    NotFound { uid: String },

    /// The response body did not match the expected page shape
    #[error("unexpected response shape: {0}")]
    Decode(String),
}

impl FetchError {
    /// Whether this error denotes a missing document rather than a failure
    pub fn is_not_found(&self) -> bool {
        matches!(self, FetchError::NotFound { .. })
    }
}
