//! Integration test: full scrape over HTTP with JSON stores, then resume.

mod common;

use std::sync::Arc;

use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::fetch::HttpFetcher;
use sitegrab_core::orchestrator::Orchestrator;
use sitegrab_core::pacing::{Pacing, PauseKind, RecordingSleeper};
use sitegrab_core::site;
use sitegrab_core::store::{JsonFileStore, ProgressState, ResultsLog, Store};
use sitegrab_core::url_list;
use tempfile::tempdir;

#[test]
fn scrape_persists_and_second_run_is_a_no_op() {
    let server = common::page_server::serve_ok("<html><title>Page</title></html>");
    let dir = tempdir().unwrap();

    let list_path = dir.path().join("urls.txt");
    let list = format!(
        "{}\n\n2|{}\nnot a url\n3|{}\n",
        server.url(""),
        server.url("about-me"),
        server.url("blog/first-post")
    );
    std::fs::write(&list_path, list).unwrap();
    let urls = url_list::load_urls(&list_path);
    assert_eq!(urls.len(), 3);

    let progress: JsonFileStore<ProgressState> =
        JsonFileStore::new(dir.path().join("scraper_progress.json"));
    let results: JsonFileStore<ResultsLog> =
        JsonFileStore::new(dir.path().join("scraper_results.json"));
    let sleeper = Arc::new(RecordingSleeper::new());
    let fetcher = HttpFetcher::from_config(&SitegrabConfig::default(), sleeper.clone());

    let summary = Orchestrator::new(&fetcher, &progress, &results, sleeper.as_ref())
        .with_pacing(Pacing::none())
        .run(&urls, 2);

    assert_eq!(summary.completed, 3);
    assert_eq!(summary.failed, 0);
    assert_eq!(summary.batches, 2);
    assert_eq!(server.hits().len(), 3);
    assert_eq!(sleeper.count(PauseKind::Batch), 1);

    let raw: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(progress.path()).unwrap()).unwrap();
    assert_eq!(raw["completed_urls"].as_array().unwrap().len(), 3);
    assert_eq!(raw["current_batch"], 2);

    let stored = results.load();
    assert_eq!(stored.len(), 3);

    // Second run: nothing left to fetch.
    let again = Orchestrator::new(&fetcher, &progress, &results, sleeper.as_ref())
        .with_pacing(Pacing::none())
        .run(&urls, 2);
    assert_eq!(again.attempted, 0);
    assert_eq!(server.hits().len(), 3);
    assert_eq!(results.load().len(), 3);

    // Generated output from the stored results.
    let out = dir.path().join("site");
    let written = site::write_pages(&stored, Some(&server.url("")), &out).unwrap();
    assert_eq!(written.len(), 2);
    assert!(out.join("about_me.html").exists());
    assert!(out.join("blog_first_post.html").exists());
}
