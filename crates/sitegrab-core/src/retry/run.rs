//! Retry loop: run a closure until success or policy says stop.

use super::classify;
use super::error::FetchError;
use super::policy::{ErrorKind, RetryDecision, RetryPolicy};
use crate::pacing::{PauseKind, Sleeper};

/// Last error once the loop gave up.
#[derive(Debug, thiserror::Error)]
#[error("{error} (after {attempts} attempt(s))")]
pub struct RetryFailure {
    pub attempts: u32,
    pub kind: ErrorKind,
    #[source]
    pub error: FetchError,
}

/// Runs `f` until it succeeds or the retry policy says to stop.
/// `f` receives the 1-based attempt number. On retryable failure, pauses for
/// the backoff duration through `sleeper` then tries again.
pub fn run_with_retry<T, F>(
    policy: &RetryPolicy,
    sleeper: &dyn Sleeper,
    mut f: F,
) -> Result<T, RetryFailure>
where
    F: FnMut(u32) -> Result<T, FetchError>,
{
    let mut attempt = 1u32;
    loop {
        match f(attempt) {
            Ok(v) => return Ok(v),
            Err(e) => {
                let kind = classify::classify(&e);
                match policy.decide(attempt, kind) {
                    RetryDecision::NoRetry => {
                        return Err(RetryFailure {
                            attempts: attempt,
                            kind,
                            error: e,
                        })
                    }
                    RetryDecision::RetryAfter(d) => {
                        tracing::warn!("attempt {} failed: {}", attempt, e);
                        tracing::info!("waiting {:.2} seconds before retry...", d.as_secs_f64());
                        sleeper.pause(d, PauseKind::Backoff);
                        attempt += 1;
                    }
                }
            }
        }
    }
}
