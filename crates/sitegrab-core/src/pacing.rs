//! Request pacing: jittered pauses and the sleeper they go through.
//!
//! Every wait in the crate (per-request jitter, between-batch pause, retry
//! backoff) goes through a [`Sleeper`], so the loop can be cut short by a
//! [`CancelToken`] and tests can record pauses instead of sleeping.

use rand::Rng;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;
use crate::config::DelayRange;

/// Why the caller is pausing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PauseKind {
    /// Between two requests of the same batch.
    Jitter,
    /// Between two batches.
    Batch,
    /// Before retrying a failed request.
    Backoff,
}

pub trait Sleeper: Send + Sync {
    fn pause(&self, duration: Duration, kind: PauseKind);
}

/// Blocks the current thread, waking early once the token is cancelled.
#[derive(Debug, Clone, Default)]
pub struct ThreadSleeper {
    cancel: Option<CancelToken>,
}

impl ThreadSleeper {
    const SLICE: Duration = Duration::from_millis(100);

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_cancel(cancel: CancelToken) -> Self {
        Self {
            cancel: Some(cancel),
        }
    }
}

impl Sleeper for ThreadSleeper {
    fn pause(&self, duration: Duration, _kind: PauseKind) {
        let Some(cancel) = &self.cancel else {
            std::thread::sleep(duration);
            return;
        };
        let deadline = Instant::now() + duration;
        loop {
            if cancel.is_cancelled() {
                return;
            }
            let now = Instant::now();
            if now >= deadline {
                return;
            }
            std::thread::sleep((deadline - now).min(Self::SLICE));
        }
    }
}

/// Records pauses instead of sleeping.
#[derive(Debug, Default)]
pub struct RecordingSleeper {
    pauses: Mutex<Vec<(PauseKind, Duration)>>,
}

impl RecordingSleeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pauses(&self) -> Vec<(PauseKind, Duration)> {
        self.pauses.lock().map(|p| p.clone()).unwrap_or_default()
    }

    pub fn count(&self, kind: PauseKind) -> usize {
        self.pauses().iter().filter(|(k, _)| *k == kind).count()
    }

    pub fn total(&self, kind: PauseKind) -> Duration {
        self.pauses()
            .iter()
            .filter(|(k, _)| *k == kind)
            .map(|(_, d)| *d)
            .sum()
    }
}

impl Sleeper for RecordingSleeper {
    fn pause(&self, duration: Duration, kind: PauseKind) {
        if let Ok(mut pauses) = self.pauses.lock() {
            pauses.push((kind, duration));
        }
    }
}

/// Uniformly random duration in `[range.min, range.max]`.
pub fn draw(range: &DelayRange) -> Duration {
    let (lo, hi) = (range.min(), range.max());
    if hi <= lo {
        return lo;
    }
    rand::thread_rng().gen_range(lo..=hi)
}

/// Pause windows for the scrape loop.
#[derive(Debug, Clone, Copy)]
pub struct Pacing {
    pub request_delay: DelayRange,
    pub batch_pause: DelayRange,
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            request_delay: DelayRange::new(2.0, 5.0),
            batch_pause: DelayRange::new(10.0, 20.0),
        }
    }
}

impl Pacing {
    /// No waiting at all (tests, local mirrors).
    pub const fn none() -> Self {
        Self {
            request_delay: DelayRange::new(0.0, 0.0),
            batch_pause: DelayRange::new(0.0, 0.0),
        }
    }

    pub fn between_requests(&self, sleeper: &dyn Sleeper) {
        let d = draw(&self.request_delay);
        tracing::info!("waiting {:.2} seconds...", d.as_secs_f64());
        sleeper.pause(d, PauseKind::Jitter);
    }

    pub fn between_batches(&self, sleeper: &dyn Sleeper) {
        let d = draw(&self.batch_pause);
        tracing::info!(
            "batch completed; pausing {:.2} seconds before next batch...",
            d.as_secs_f64()
        );
        sleeper.pause(d, PauseKind::Batch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_stays_within_bounds() {
        let range = DelayRange::new(0.01, 0.05);
        for _ in 0..200 {
            let d = draw(&range);
            assert!(d >= Duration::from_millis(10));
            assert!(d <= Duration::from_millis(50));
        }
    }

    #[test]
    fn draw_degenerate_range_is_exact() {
        assert_eq!(draw(&DelayRange::new(1.0, 1.0)), Duration::from_secs(1));
        assert_eq!(draw(&DelayRange::new(0.0, 0.0)), Duration::ZERO);
    }

    #[test]
    fn recording_sleeper_tracks_kinds() {
        let s = RecordingSleeper::new();
        let pacing = Pacing {
            request_delay: DelayRange::new(2.0, 2.0),
            batch_pause: DelayRange::new(10.0, 10.0),
        };
        pacing.between_requests(&s);
        pacing.between_requests(&s);
        pacing.between_batches(&s);
        assert_eq!(s.count(PauseKind::Jitter), 2);
        assert_eq!(s.count(PauseKind::Batch), 1);
        assert_eq!(s.total(PauseKind::Jitter), Duration::from_secs(4));
    }

    #[test]
    fn thread_sleeper_returns_early_when_cancelled() {
        let token = CancelToken::new();
        token.cancel();
        let s = ThreadSleeper::with_cancel(token);
        let start = Instant::now();
        s.pause(Duration::from_secs(30), PauseKind::Batch);
        assert!(start.elapsed() < Duration::from_secs(1));
    }
}
