//! Cooperative cancellation for the scrape loop.
//!
//! The CLI hands a `CancelToken` to the orchestrator and to the sleeper, and
//! flips it from a Ctrl-C handler. The loop checks the token between URLs and
//! while pausing; an in-flight request is never interrupted.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Reported when a run stops because the token was set.
#[derive(Debug, thiserror::Error)]
#[error("run cancelled by user")]
pub struct RunCancelled;

/// Shared abort flag. Clones observe the same state.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation; every clone sees it on its next check.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    /// `Err(RunCancelled)` once cancelled, for use with `?` in loops.
    pub fn check(&self) -> Result<(), RunCancelled> {
        if self.is_cancelled() {
            Err(RunCancelled)
        } else {
            Ok(())
        }
    }
}
