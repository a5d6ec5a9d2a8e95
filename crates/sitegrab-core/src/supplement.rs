//! Appending specific pages to an existing results file.
//!
//! Unlike a full run this keeps no progress checkpoint: the results file is
//! the only record, and a URL already present there is skipped without being
//! re-fetched. Each new page is also written out as its own HTML file.

use anyhow::{Context, Result};
use std::path::Path;

use crate::fetch::PageFetcher;
use crate::pacing::{Pacing, Sleeper};
use crate::record::PageRecord;
use crate::site;
use crate::store::{ResultsLog, Store};

/// Fetch `urls` not yet in `results`, persist each success immediately and
/// write its page file into `out_dir`. Returns the newly added records.
pub fn append_pages(
    urls: &[String],
    fetcher: &dyn PageFetcher,
    results: &dyn Store<ResultsLog>,
    sleeper: &dyn Sleeper,
    pacing: &Pacing,
    out_dir: &Path,
) -> Result<Vec<PageRecord>> {
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("create dir: {}", out_dir.display()))?;
    let mut log = results.load();
    let mut added = Vec::new();
    tracing::info!("starting to scrape {} additional pages", urls.len());

    for (i, url) in urls.iter().enumerate() {
        tracing::info!("processing {}/{}: {}", i + 1, urls.len(), url);

        if log.contains_url(url) {
            tracing::info!("URL already exists in results, skipping: {}", url);
            continue;
        }

        match fetcher.fetch(url) {
            Ok(record) => {
                site::write_page_file(&record, out_dir)?;
                log.push_unique(record.clone());
                results.save(&log)?;
                tracing::info!("added to results: {}", url);
                added.push(record);
            }
            Err(failure) => tracing::error!("failed to scrape {}: {}", url, failure.reason),
        }

        if i + 1 < urls.len() {
            pacing.between_requests(sleeper);
        }
    }

    tracing::info!(
        "scraping completed; added {} additional pages",
        added.len()
    );
    Ok(added)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::FetchFailure;
    use crate::pacing::{PauseKind, RecordingSleeper};
    use crate::store::MemoryStore;
    use std::cell::RefCell;

    struct EchoFetcher {
        calls: RefCell<Vec<String>>,
    }

    impl PageFetcher for EchoFetcher {
        fn fetch(&self, url: &str) -> Result<PageRecord, FetchFailure> {
            self.calls.borrow_mut().push(url.to_string());
            if url.ends_with("broken") {
                return Err(FetchFailure {
                    url: url.to_string(),
                    attempts: 3,
                    unexpected: false,
                    reason: "HTTP 404".into(),
                });
            }
            Ok(PageRecord::now(url, format!("<p>{url}</p>"), 200))
        }
    }

    #[test]
    fn skips_known_urls_and_writes_new_pages() {
        let mut existing = ResultsLog::default();
        existing.push_unique(PageRecord::now("https://site.test/blog/old", "old".into(), 200));
        let store = MemoryStore::new(existing);
        let fetcher = EchoFetcher {
            calls: RefCell::new(Vec::new()),
        };
        let sleeper = RecordingSleeper::new();
        let dir = tempfile::tempdir().unwrap();
        let urls: Vec<String> = [
            "https://site.test/blog/old",
            "https://site.test/blog/new-post",
            "https://site.test/broken",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();

        let added =
            append_pages(&urls, &fetcher, &store, &sleeper, &Pacing::none(), dir.path()).unwrap();

        assert_eq!(added.len(), 1);
        assert_eq!(
            *fetcher.calls.borrow(),
            vec!["https://site.test/blog/new-post", "https://site.test/broken"]
        );
        let log = store.load();
        assert_eq!(log.len(), 2);
        assert_eq!(log.find("https://site.test/blog/old").unwrap().html_content, "old");
        assert!(dir.path().join("blog_new_post.html").exists());
        // Skipped URLs do not pause; the other two pause once between them.
        assert_eq!(sleeper.count(PauseKind::Jitter), 1);
    }
}
