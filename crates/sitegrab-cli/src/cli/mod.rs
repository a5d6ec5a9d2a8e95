//! CLI for sitegrab.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use sitegrab_core::config::{self, SitegrabConfig};
use std::path::PathBuf;

use commands::{run_add, run_homepage, run_index, run_pages, run_scrape, run_status};

/// Top-level CLI for sitegrab.
#[derive(Debug, Parser)]
#[command(name = "sitegrab")]
#[command(about = "sitegrab: resumable, paced page scraper with static HTML output", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub state: StateArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for the state file locations in config.toml.
#[derive(Debug, Args)]
pub struct StateArgs {
    /// Progress checkpoint file.
    #[arg(long, global = true, value_name = "PATH")]
    pub progress_file: Option<PathBuf>,

    /// Results file with every scraped page.
    #[arg(long, global = true, value_name = "PATH")]
    pub results_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scrape every URL listed in a file, resuming from the progress checkpoint.
    Scrape {
        /// Text file with one URL (or `index|URL`) per line.
        url_file: PathBuf,

        /// URLs per batch (defaults to config).
        #[arg(long, value_name = "N")]
        batch_size: Option<usize>,
    },

    /// Scrape extra URLs, append them to the results and write their page files.
    Add {
        /// URLs to add.
        #[arg(required = true)]
        urls: Vec<String>,

        /// Directory for the generated page files.
        #[arg(long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Write the site root's HTML to a standalone file.
    Homepage {
        /// Root URL of the site (defaults to config `site_root`).
        #[arg(long, value_name = "URL")]
        site_root: Option<String>,

        /// Output file.
        #[arg(long, default_value = "homepage.html", value_name = "FILE")]
        out: PathBuf,
    },

    /// Write one HTML file per scraped page.
    Pages {
        /// Root URL to leave out (defaults to config `site_root`).
        #[arg(long, value_name = "URL")]
        site_root: Option<String>,

        /// Output directory.
        #[arg(long, default_value = ".", value_name = "DIR")]
        out_dir: PathBuf,
    },

    /// Render the index page from a template.
    Index {
        /// Template containing the scraped-pages block.
        #[arg(long, value_name = "FILE")]
        template: PathBuf,

        /// Output file.
        #[arg(long, default_value = "index.html", value_name = "FILE")]
        out: PathBuf,
    },

    /// Show progress and results counts.
    Status,
}

impl StateArgs {
    fn apply(self, cfg: &mut SitegrabConfig) {
        if let Some(p) = self.progress_file {
            cfg.progress_file = p;
        }
        if let Some(p) = self.results_file {
            cfg.results_file = p;
        }
    }
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let mut cfg = config::load_or_init()?;
        cli.state.apply(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Scrape {
                url_file,
                batch_size,
            } => {
                if let Some(n) = batch_size {
                    cfg.batch_size = n;
                }
                run_scrape(&cfg, &url_file).await?
            }
            CliCommand::Add { urls, out_dir } => run_add(&cfg, urls, &out_dir).await?,
            CliCommand::Homepage { site_root, out } => {
                run_homepage(&cfg, site_root.as_deref(), &out)?
            }
            CliCommand::Pages { site_root, out_dir } => {
                run_pages(&cfg, site_root.as_deref(), &out_dir)?
            }
            CliCommand::Index { template, out } => run_index(&cfg, &template, &out)?,
            CliCommand::Status => run_status(&cfg)?,
        }

        Ok(())
    }
}
