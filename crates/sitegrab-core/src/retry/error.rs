//! Fetch error type for retry classification.

/// Error from a single GET attempt.
/// Kept separate from anyhow so the retry loop can classify it.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// Curl reported an error while performing the request (timeout, connection, etc.).
    #[error("{0}")]
    Curl(#[source] curl::Error),
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The request could not be set up (bad option, header list failure). Not retried.
    #[error("request setup: {0}")]
    Setup(#[source] curl::Error),
}
