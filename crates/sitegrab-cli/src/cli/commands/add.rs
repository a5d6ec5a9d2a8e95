//! `sitegrab add <url>...` – scrape extra pages into the existing results.

use anyhow::{Context, Result};
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::fetch::HttpFetcher;
use sitegrab_core::pacing::{Pacing, ThreadSleeper};
use sitegrab_core::store::{JsonFileStore, ResultsLog};
use sitegrab_core::supplement;
use sitegrab_core::site;
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub async fn run_add(cfg: &SitegrabConfig, urls: Vec<String>, out_dir: &Path) -> Result<()> {
    let cfg = cfg.clone();
    let out_dir: PathBuf = out_dir.to_path_buf();
    let added = tokio::task::spawn_blocking(move || {
        let sleeper = Arc::new(ThreadSleeper::new());
        let fetcher = HttpFetcher::from_config(&cfg, sleeper.clone());
        let results: JsonFileStore<ResultsLog> = JsonFileStore::new(&cfg.results_file);
        let pacing = Pacing {
            request_delay: cfg.request_delay,
            batch_pause: cfg.batch_pause,
        };
        supplement::append_pages(&urls, &fetcher, &results, sleeper.as_ref(), &pacing, &out_dir)
            .map(|added| (added, out_dir))
    })
    .await
    .context("add task join")??;

    let (added, out_dir) = added;
    println!("Added {} page(s).", added.len());
    for record in &added {
        println!("  - {}", out_dir.join(site::page_filename(&record.url)).display());
    }
    Ok(())
}
