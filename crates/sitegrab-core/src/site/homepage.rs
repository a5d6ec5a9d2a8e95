use anyhow::{Context, Result};
use std::path::Path;

use super::same_url;
use crate::record::PageRecord;
use crate::store::ResultsLog;

/// The record for the site root, ignoring a trailing slash.
pub fn find_root<'a>(results: &'a ResultsLog, site_root: &str) -> Option<&'a PageRecord> {
    results.records.iter().find(|r| same_url(&r.url, site_root))
}

/// Write the site root's HTML verbatim to `out`.
pub fn write_homepage(results: &ResultsLog, site_root: &str, out: &Path) -> Result<()> {
    let page = find_root(results, site_root)
        .with_context(|| format!("no scraped page for site root {site_root}"))?;
    std::fs::write(out, &page.html_content)
        .with_context(|| format!("write homepage: {}", out.display()))?;
    tracing::info!("created {}", out.display());
    Ok(())
}
