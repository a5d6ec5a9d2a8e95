//! `sitegrab scrape <file>` – batch scrape with resumable progress.

use anyhow::{Context, Result};
use sitegrab_core::cancel::CancelToken;
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::fetch::HttpFetcher;
use sitegrab_core::orchestrator::{Orchestrator, RunSummary};
use sitegrab_core::pacing::{Pacing, ThreadSleeper};
use sitegrab_core::store::{JsonFileStore, ProgressState, ResultsLog};
use sitegrab_core::url_list;
use std::path::Path;
use std::sync::Arc;

pub async fn run_scrape(cfg: &SitegrabConfig, url_file: &Path) -> Result<()> {
    let urls = url_list::load_urls(url_file);
    if urls.is_empty() {
        tracing::error!("no URLs to process");
        return Ok(());
    }

    let cancel = CancelToken::new();
    let interrupt = spawn_interrupt_listener(cancel.clone());

    let cfg_owned = cfg.clone();
    let summary = tokio::task::spawn_blocking(move || scrape_blocking(&cfg_owned, &urls, cancel))
        .await
        .context("scrape task join")?;
    interrupt.abort();

    println!(
        "Completed: {}  Failed: {}  Fetched this run: {}{}",
        summary.completed,
        summary.failed,
        summary.fetched,
        if summary.interrupted { "  (interrupted)" } else { "" }
    );
    println!("Results: {}", cfg.results_file.display());
    println!("Progress: {}", cfg.progress_file.display());
    Ok(())
}

fn scrape_blocking(cfg: &SitegrabConfig, urls: &[String], cancel: CancelToken) -> RunSummary {
    let pause_sleeper = ThreadSleeper::with_cancel(cancel.clone());
    let fetcher = HttpFetcher::from_config(cfg, Arc::new(ThreadSleeper::new()));
    let progress: JsonFileStore<ProgressState> = JsonFileStore::new(&cfg.progress_file);
    let results: JsonFileStore<ResultsLog> = JsonFileStore::new(&cfg.results_file);
    let pacing = Pacing {
        request_delay: cfg.request_delay,
        batch_pause: cfg.batch_pause,
    };

    Orchestrator::new(&fetcher, &progress, &results, &pause_sleeper)
        .with_pacing(pacing)
        .with_cancel(cancel)
        .run(urls, cfg.batch_size)
}

/// First Ctrl-C stops after the current URL; a second one exits immediately.
fn spawn_interrupt_listener(cancel: CancelToken) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received; stopping after the current URL (Ctrl-C again to quit)");
            cancel.cancel();
            if tokio::signal::ctrl_c().await.is_ok() {
                eprintln!("\nForce quit requested, exiting immediately...");
                std::process::exit(130);
            }
        }
    })
}
