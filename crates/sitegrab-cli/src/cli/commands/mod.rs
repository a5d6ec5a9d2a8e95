//! CLI command handlers, one per file.

mod add;
mod homepage;
mod index;
mod pages;
mod scrape;
mod status;

pub use add::run_add;
pub use homepage::run_homepage;
pub use index::run_index;
pub use pages::run_pages;
pub use scrape::run_scrape;
pub use status::run_status;

use anyhow::Result;
use sitegrab_core::config::SitegrabConfig;

/// Site root from the flag, else from config.
fn site_root<'a>(cfg: &'a SitegrabConfig, flag: Option<&'a str>) -> Result<&'a str> {
    flag.or(cfg.site_root.as_deref()).ok_or_else(|| {
        anyhow::anyhow!("no site root: pass --site-root or set site_root in config.toml")
    })
}
