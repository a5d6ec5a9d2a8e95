//! Retry and backoff policy.
//!
//! This module classifies fetch errors (timeouts, throttling, connection
//! failures, bad statuses) and makes exponential backoff decisions so the
//! fetcher and the supplementary scraper share one policy.

mod classify;
mod error;
mod policy;
mod run;

pub use classify::{classify, classify_curl_error, classify_http_status};
pub use error::FetchError;
pub use policy::{ErrorKind, RetryDecision, RetryPolicy};
pub use run::{run_with_retry, RetryFailure};
