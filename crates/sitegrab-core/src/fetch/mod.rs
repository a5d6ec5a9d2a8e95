//! Page fetching.
//!
//! [`HttpFetcher`] performs blocking GETs with libcurl, drawing a fresh
//! [`RequestProfile`] (rotated User-Agent, fixed timeouts) for every attempt,
//! and retries request-level failures with exponential backoff. A failed URL
//! comes back as a [`FetchFailure`] value; nothing here aborts the caller.

mod get;
mod profile;

pub use get::{get_once, PageResponse};
pub use profile::{RequestProfile, UserAgentPool, DEFAULT_USER_AGENTS};

use std::sync::Arc;

use crate::config::{FetchConfig, SitegrabConfig};
use crate::pacing::Sleeper;
use crate::record::PageRecord;
use crate::retry::{run_with_retry, ErrorKind, RetryPolicy};

/// A URL that could not be fetched.
#[derive(Debug, Clone, thiserror::Error)]
#[error("failed to fetch {url} after {attempts} attempt(s): {reason}")]
pub struct FetchFailure {
    pub url: String,
    pub attempts: u32,
    /// True when the error was outside the retryable request-level category.
    pub unexpected: bool,
    pub reason: String,
}

/// Fetches one URL into a page record.
pub trait PageFetcher {
    fn fetch(&self, url: &str) -> Result<PageRecord, FetchFailure>;
}

pub struct HttpFetcher {
    agents: UserAgentPool,
    fetch: FetchConfig,
    policy: RetryPolicy,
    sleeper: Arc<dyn Sleeper>,
}

impl HttpFetcher {
    pub fn new(
        agents: UserAgentPool,
        fetch: FetchConfig,
        policy: RetryPolicy,
        sleeper: Arc<dyn Sleeper>,
    ) -> Self {
        Self {
            agents,
            fetch,
            policy,
            sleeper,
        }
    }

    /// Fetcher wired from the global config.
    pub fn from_config(cfg: &SitegrabConfig, sleeper: Arc<dyn Sleeper>) -> Self {
        let agents = cfg
            .user_agents
            .clone()
            .map(UserAgentPool::new)
            .unwrap_or_default();
        Self::new(
            agents,
            cfg.fetch.clone(),
            RetryPolicy::from(&cfg.retry_or_default()),
            sleeper,
        )
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<PageRecord, FetchFailure> {
        let max = self.policy.max_attempts;
        let result = run_with_retry(&self.policy, self.sleeper.as_ref(), |attempt| {
            let profile = RequestProfile::draw(&self.agents, &self.fetch);
            tracing::info!("scraping: {} (attempt {}/{})", url, attempt, max);
            get_once(url, &profile)
        });

        match result {
            Ok(resp) => {
                tracing::info!("successfully scraped: {}", url);
                Ok(PageRecord::now(url, resp.body, resp.status))
            }
            Err(failure) => {
                let unexpected = failure.kind == ErrorKind::Unexpected;
                if unexpected {
                    tracing::error!("unexpected error scraping {}: {}", url, failure.error);
                } else {
                    tracing::warn!("attempt {} failed for {}: {}", failure.attempts, url, failure.error);
                    tracing::error!("all attempts failed for {}", url);
                }
                Err(FetchFailure {
                    url: url.to_string(),
                    attempts: failure.attempts,
                    unexpected,
                    reason: failure.error.to_string(),
                })
            }
        }
    }
}
