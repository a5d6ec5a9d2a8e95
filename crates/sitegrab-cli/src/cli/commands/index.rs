//! `sitegrab index --template <file>` – render the index page.

use anyhow::Result;
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::site;
use sitegrab_core::store::{JsonFileStore, ResultsLog, Store};
use std::path::Path;

pub fn run_index(cfg: &SitegrabConfig, template: &Path, out: &Path) -> Result<()> {
    let results = JsonFileStore::<ResultsLog>::new(&cfg.results_file).load();
    site::write_index(template, &results, out)?;
    println!("Generated {} with {} pages", out.display(), results.len());
    for (i, record) in results.records.iter().enumerate() {
        let title = site::extract_title(&record.html_content).unwrap_or_default();
        println!("  {:>2}. {} ({})", i + 1, title, record.url);
    }
    Ok(())
}
