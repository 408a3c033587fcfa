//! Command line interface for the `market-dashboard` binary.

use std::path::PathBuf;

use clap::Parser;
use dashboard_core::ChartRange;

use crate::config::{DashboardConfig, load_config_path};

#[derive(Debug, Parser)]
#[command(author, version, about = "Terminal gold market dashboard")]
pub struct Cli {
    /// Path to a dashboard TOML config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Backend root URL (overrides config and MARKET_DASHBOARD_URL)
    #[arg(long)]
    pub base_url: Option<String>,

    /// Chart range to start on: daily, weekly or yearly
    #[arg(short, long)]
    pub range: Option<ChartRange>,

    /// Directory to write chart SVGs into
    #[arg(long)]
    pub svg_dir: Option<PathBuf>,

    /// Refresh metrics and news once, print them and exit
    #[arg(long)]
    pub once: bool,

    /// Print a line for every clock tick
    #[arg(long)]
    pub clock: bool,
}

impl Cli {
    /// Resolve the effective configuration: file, then environment, then flags.
    pub fn load_config(&self) -> anyhow::Result<DashboardConfig> {
        let mut cfg = match &self.config {
            Some(path) => load_config_path(path)?,
            None => DashboardConfig::default(),
        };
        cfg.apply_env_overrides()?;
        if let Some(url) = &self.base_url {
            cfg.feed.base_url = url.clone();
        }
        if let Some(range) = self.range {
            cfg.charts.default_range = range;
        }
        if let Some(dir) = &self.svg_dir {
            cfg.charts.svg_dir = Some(dir.clone());
        }
        cfg.validate()?;
        Ok(cfg)
    }
}
