//! `sitegrab homepage` – copy the site root's HTML to a file.

use anyhow::Result;
use sitegrab_core::config::SitegrabConfig;
use sitegrab_core::site;
use sitegrab_core::store::{JsonFileStore, ResultsLog, Store};
use std::path::Path;

pub fn run_homepage(cfg: &SitegrabConfig, site_root: Option<&str>, out: &Path) -> Result<()> {
    let root = super::site_root(cfg, site_root)?;
    let results = JsonFileStore::<ResultsLog>::new(&cfg.results_file).load();
    site::write_homepage(&results, root, out)?;
    println!("Created {}", out.display());
    Ok(())
}
