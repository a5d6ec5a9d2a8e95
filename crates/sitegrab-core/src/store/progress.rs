use serde::{Deserialize, Serialize};

/// Resume checkpoint: which URLs are done, which failed, how many batches ran.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressState {
    #[serde(default)]
    pub completed_urls: Vec<String>,
    #[serde(default)]
    pub failed_urls: Vec<String>,
    #[serde(default)]
    pub current_batch: usize,
}

impl ProgressState {
    pub fn is_completed(&self, url: &str) -> bool {
        self.completed_urls.iter().any(|u| u == url)
    }

    /// Record a success. A URL is listed at most once and leaves `failed_urls`.
    pub fn mark_completed(&mut self, url: &str) {
        self.failed_urls.retain(|u| u != url);
        if !self.is_completed(url) {
            self.completed_urls.push(url.to_string());
        }
    }

    /// Record an exhausted URL. Completed URLs are never marked failed.
    pub fn mark_failed(&mut self, url: &str) {
        if self.is_completed(url) || self.failed_urls.iter().any(|u| u == url) {
            return;
        }
        self.failed_urls.push(url.to_string());
    }

    /// URLs from `urls` not yet completed, in order.
    pub fn pending<'a>(&self, urls: &'a [String]) -> Vec<&'a String> {
        urls.iter().filter(|u| !self.is_completed(u)).collect()
    }
}
