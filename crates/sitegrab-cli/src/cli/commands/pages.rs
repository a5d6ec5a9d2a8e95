//! `sitegrab pages` – one HTML file per scraped page.

use anyhow::Result;
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::site;
use sitegrab_core::store::{JsonFileStore, ResultsLog, Store};
use std::path::Path;

pub fn run_pages(cfg: &SitegrabConfig, site_root: Option<&str>, out_dir: &Path) -> Result<()> {
    let results = JsonFileStore::<ResultsLog>::new(&cfg.results_file).load();
    let root = site_root.or(cfg.site_root.as_deref());
    let written = site::write_pages(&results, root, out_dir)?;
    for path in &written {
        println!("Created {}", path.display());
    }
    Ok(())
}
