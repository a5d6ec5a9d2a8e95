//! `sitegrab status` – show checkpoint and results counts.

use anyhow::Result;
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::store::{JsonFileStore, ProgressState, ResultsLog, Store};

pub fn run_status(cfg: &SitegrabConfig) -> Result<()> {
    let progress = JsonFileStore::<ProgressState>::new(&cfg.progress_file).load();
    let results = JsonFileStore::<ResultsLog>::new(&cfg.results_file).load();

    println!("{:<12} {}", "COMPLETED", progress.completed_urls.len());
    println!("{:<12} {}", "FAILED", progress.failed_urls.len());
    println!("{:<12} {}", "BATCH", progress.current_batch);
    println!("{:<12} {}", "RESULTS", results.len());
    for url in &progress.failed_urls {
        println!("  failed: {url}");
    }
    Ok(())
}
