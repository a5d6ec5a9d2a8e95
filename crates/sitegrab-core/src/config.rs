use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Inclusive range of seconds a pause is drawn from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DelayRange {
    pub min_secs: f64,
    pub max_secs: f64,
}

impl DelayRange {
    pub const fn new(min_secs: f64, max_secs: f64) -> Self {
        Self { min_secs, max_secs }
    }

    pub fn min(&self) -> Duration {
        secs(self.min_secs)
    }

    pub fn max(&self) -> Duration {
        secs(self.max_secs.max(self.min_secs))
    }
}

/// Per-request HTTP settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Whole-request timeout in seconds.
    pub timeout_secs: u64,
    /// TCP/TLS connect timeout in seconds.
    pub connect_timeout_secs: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            connect_timeout_secs: 15,
        }
    }
}

/// Retry policy parameters (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    /// Maximum number of attempts per URL (including the first).
    pub max_attempts: u32,
    /// Base delay in seconds for exponential backoff.
    pub base_delay_secs: f64,
    /// Maximum backoff delay in seconds.
    pub max_delay_secs: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_secs: 2.0,
            max_delay_secs: 60,
        }
    }
}

/// Global configuration loaded from `~/.config/sitegrab/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SitegrabConfig {
    /// URLs per batch; a longer pause separates batches.
    pub batch_size: usize,
    /// Progress checkpoint file (relative paths resolve against the working directory).
    pub progress_file: PathBuf,
    /// Results file holding every fetched page.
    pub results_file: PathBuf,
    /// Root URL of the scraped site, used by the homepage and page generators.
    #[serde(default)]
    pub site_root: Option<String>,
    /// Optional User-Agent pool; if missing, the built-in desktop browser pool is used.
    #[serde(default)]
    pub user_agents: Option<Vec<String>>,
    // Tables last so the TOML writer emits plain values first.
    /// Jittered pause between requests inside a batch.
    pub request_delay: DelayRange,
    /// Jittered pause between batches.
    pub batch_pause: DelayRange,
    #[serde(default)]
    pub fetch: FetchConfig,
    /// Optional retry policy; if missing, built-in defaults are used.
    #[serde(default)]
    pub retry: Option<RetryConfig>,
}

impl Default for SitegrabConfig {
    fn default() -> Self {
        Self {
            batch_size: 5,
            progress_file: PathBuf::from("scraper_progress.json"),
            results_file: PathBuf::from("scraper_results.json"),
            site_root: None,
            user_agents: None,
            request_delay: DelayRange::new(2.0, 5.0),
            batch_pause: DelayRange::new(10.0, 20.0),
            fetch: FetchConfig::default(),
            retry: None,
        }
    }
}

impl SitegrabConfig {
    pub fn retry_or_default(&self) -> RetryConfig {
        self.retry.clone().unwrap_or_default()
    }
}

pub(crate) fn secs(value: f64) -> Duration {
    if value > 0.0 {
        Duration::try_from_secs_f64(value).unwrap_or(Duration::MAX)
    } else {
        Duration::ZERO
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("sitegrab")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SitegrabConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SitegrabConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<SitegrabConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("read config: {}", path.display()))?;
    let cfg: SitegrabConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
