//! Batch orchestration of a scrape run.
//!
//! URLs already recorded as completed are dropped up front; the rest are cut
//! into fixed-size batches and fetched one at a time. Both stores are saved
//! after every attempt, so an interrupted run resumes where it stopped.

use anyhow::Result;

use crate::cancel::{CancelToken, RunCancelled};
use crate::fetch::PageFetcher;
use crate::pacing::{Pacing, Sleeper};
use crate::store::{ProgressState, ResultsLog, Store};

/// Contiguous batches of at most `batch_size` items (0 is treated as 1).
pub fn plan_batches<T>(items: &[T], batch_size: usize) -> Vec<&[T]> {
    items.chunks(batch_size.max(1)).collect()
}

/// Outcome of one run, totals taken from the progress state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    pub failed_urls: Vec<String>,
    /// URLs attempted during this run.
    pub attempted: usize,
    /// URLs fetched successfully during this run.
    pub fetched: usize,
    /// Batches that ran to the end.
    pub batches: usize,
    pub interrupted: bool,
}

struct RunState {
    progress: ProgressState,
    results: ResultsLog,
    attempted: usize,
    fetched: usize,
}

pub struct Orchestrator<'a> {
    fetcher: &'a dyn PageFetcher,
    progress: &'a dyn Store<ProgressState>,
    results: &'a dyn Store<ResultsLog>,
    sleeper: &'a dyn Sleeper,
    pacing: Pacing,
    cancel: CancelToken,
}

impl<'a> Orchestrator<'a> {
    pub fn new(
        fetcher: &'a dyn PageFetcher,
        progress: &'a dyn Store<ProgressState>,
        results: &'a dyn Store<ResultsLog>,
        sleeper: &'a dyn Sleeper,
    ) -> Self {
        Self {
            fetcher,
            progress,
            results,
            sleeper,
            pacing: Pacing::default(),
            cancel: CancelToken::new(),
        }
    }

    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    pub fn with_cancel(mut self, cancel: CancelToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Fetch every not-yet-completed URL in `urls`, `batch_size` at a time.
    pub fn run(&self, urls: &[String], batch_size: usize) -> RunSummary {
        let mut state = RunState {
            progress: self.progress.load(),
            results: self.results.load(),
            attempted: 0,
            fetched: 0,
        };

        let remaining: Vec<String> = state.progress.pending(urls).into_iter().cloned().collect();
        tracing::info!("starting scraping process for {} URLs", urls.len());
        tracing::info!("batch size: {}", batch_size.max(1));
        tracing::info!(
            "request delay: {:.1}-{:.1} seconds",
            self.pacing.request_delay.min_secs,
            self.pacing.request_delay.max_secs
        );
        tracing::info!("remaining URLs to process: {}", remaining.len());

        let batches = plan_batches(&remaining, batch_size);
        let mut batches_done = 0usize;
        let mut interrupted = false;

        for (idx, batch) in batches.iter().enumerate() {
            if self.cancel.is_cancelled() {
                interrupted = true;
                break;
            }
            match self.process_batch(&mut state, batch, idx) {
                Ok(()) => {}
                Err(e) if e.is::<RunCancelled>() => {
                    interrupted = true;
                    break;
                }
                Err(e) => {
                    tracing::error!("error processing batch {}: {:#}", idx + 1, e);
                    continue;
                }
            }

            batches_done += 1;
            state.progress.current_batch = idx + 1;
            if let Err(e) = self.progress.save(&state.progress) {
                tracing::error!("could not save progress after batch {}: {:#}", idx + 1, e);
            }

            if idx + 1 < batches.len() {
                self.pacing.between_batches(self.sleeper);
            }
        }

        if interrupted {
            tracing::info!("scraping interrupted by user");
        }

        let summary = RunSummary {
            completed: state.progress.completed_urls.len(),
            failed: state.progress.failed_urls.len(),
            failed_urls: state.progress.failed_urls.clone(),
            attempted: state.attempted,
            fetched: state.fetched,
            batches: batches_done,
            interrupted,
        };
        log_summary(&summary);
        summary
    }

    fn process_batch(&self, state: &mut RunState, batch: &[String], idx: usize) -> Result<()> {
        tracing::info!("processing batch {} with {} URLs", idx + 1, batch.len());

        for (i, url) in batch.iter().enumerate() {
            self.cancel.check()?;

            if state.progress.is_completed(url) {
                tracing::info!("skipping already processed URL: {}", url);
                continue;
            }

            state.attempted += 1;
            match self.fetcher.fetch(url) {
                Ok(record) => {
                    state.results.push_unique(record);
                    state.progress.mark_completed(url);
                    state.fetched += 1;
                    tracing::info!(
                        "progress: {} URLs completed",
                        state.progress.completed_urls.len()
                    );
                }
                Err(failure) => {
                    state.progress.mark_failed(url);
                    tracing::error!("failed to scrape {}: {}", url, failure.reason);
                }
            }

            self.progress.save(&state.progress)?;
            self.results.save(&state.results)?;

            if i + 1 < batch.len() {
                self.pacing.between_requests(self.sleeper);
            }
        }
        Ok(())
    }
}

fn log_summary(summary: &RunSummary) {
    tracing::info!("scraping completed");
    tracing::info!("total URLs processed: {}", summary.completed);
    tracing::info!("total URLs failed: {}", summary.failed);
    if !summary.failed_urls.is_empty() {
        tracing::warn!("failed URLs: {:?}", summary.failed_urls);
    }
}
