//! Client error types.

use gap_core::CleanError;
use thiserror::Error;

/// Errors that can occur when talking to the GAP API.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The client was built from incomplete configuration. No request is
    /// ever issued by a disabled client.
    #[error("client disabled: {0}")]
    Disabled(String),

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, as much of it as was readable.
        body: String,
    },

    /// The API returned a 429 Too Many Requests response. Not retried.
    #[error("rate limited, retry after {retry_after_secs}s")]
    RateLimited {
        /// Seconds the server asked us to wait.
        retry_after_secs: u64,
    },

    /// Acquiring a bearer token failed.
    #[error("auth error: {0}")]
    Auth(String),

    /// A response could not be decoded into the expected shape.
    #[error("parse error: {0}")]
    Parse(String),

    /// A record failed cleaning.
    #[error(transparent)]
    Clean(#[from] CleanError),

    /// The caller passed a body the operation cannot use.
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

impl ClientError {
    /// Whether this is the sticky "not configured" outcome rather than a
    /// failed request.
    #[must_use]
    pub const fn is_disabled(&self) -> bool {
        matches!(self, Self::Disabled(_))
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(error: serde_json::Error) -> Self {
        Self::Parse(error.to_string())
    }
}
