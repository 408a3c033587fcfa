//! TOML configuration for the dashboard runtime.
//!
//! Every section and every key is optional; a missing file section falls back
//! to the values the dashboard has always used. Example:
//!
//! ```toml
//! [feed]
//! base_url = "http://127.0.0.1:5000"
//! timeout_secs = 8
//!
//! [schedule]
//! metrics_secs = 10
//! clock_secs = 1
//! news_secs = 300
//!
//! [charts]
//! default_range = "weekly"
//! svg_dir = "charts"
//! width = 320
//! height = 160
//!
//! [palettes.gram]
//! pos = "#34d399"
//! neg = "#f87171"
//! neu = "#fbbf24"
//! ```

use std::{path::PathBuf, time::Duration};

use anyhow::{Context, ensure};
use dashboard_core::{ChartRange, PaletteSet, schedule::ScheduleIntervals};
use serde::{Deserialize, Serialize};
use shared_utils::env::{env_override, parse_env_override};
use toml::from_str;
use tracing::info;

/// Overrides `[feed].base_url`.
pub const BASE_URL_ENV: &str = "MARKET_DASHBOARD_URL";
/// Overrides `[charts].default_range`.
pub const RANGE_ENV: &str = "MARKET_DASHBOARD_RANGE";

/// Backend connection settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Root URL of the dashboard backend.
    pub base_url: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".to_string(),
            timeout_secs: 8,
        }
    }
}

impl FeedConfig {
    /// Timeout as a [`Duration`].
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Task periods, in seconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScheduleConfig {
    /// Metrics refresh period.
    pub metrics_secs: u64,
    /// Clock tick period.
    pub clock_secs: u64,
    /// News refresh period.
    pub news_secs: u64,
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            metrics_secs: 10,
            clock_secs: 1,
            news_secs: 300,
        }
    }
}

impl ScheduleConfig {
    /// Convert to scheduler intervals.
    pub fn intervals(&self) -> ScheduleIntervals {
        ScheduleIntervals {
            metrics: Duration::from_secs(self.metrics_secs),
            clock: Duration::from_secs(self.clock_secs),
            news: Duration::from_secs(self.news_secs),
        }
    }
}

/// Chart output settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartsConfig {
    /// Range selected at startup.
    pub default_range: ChartRange,
    /// Directory to write `<key>.svg` files into; no charts are rendered
    /// when unset.
    pub svg_dir: Option<PathBuf>,
    /// SVG width in pixels.
    pub width: f64,
    /// SVG height in pixels.
    pub height: f64,
}

impl Default for ChartsConfig {
    fn default() -> Self {
        Self {
            default_range: ChartRange::Daily,
            svg_dir: None,
            width: 320.0,
            height: 160.0,
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    /// `[feed]`
    pub feed: FeedConfig,
    /// `[schedule]`
    pub schedule: ScheduleConfig,
    /// `[charts]`
    pub charts: ChartsConfig,
    /// `[palettes.<chart>]`
    pub palettes: PaletteSet,
}

impl DashboardConfig {
    /// Apply `MARKET_DASHBOARD_URL` and `MARKET_DASHBOARD_RANGE` if set.
    pub fn apply_env_overrides(&mut self) -> anyhow::Result<()> {
        if let Some(url) = env_override(BASE_URL_ENV) {
            info!(%url, "base URL overridden from environment");
            self.feed.base_url = url;
        }
        if let Some(range) = parse_env_override::<ChartRange>(RANGE_ENV)? {
            self.charts.default_range = range;
        }
        Ok(())
    }

    /// Reject values that would make the runtime spin or never fetch.
    pub fn validate(&self) -> anyhow::Result<()> {
        let s = &self.schedule;
        ensure!(
            s.metrics_secs > 0 && s.clock_secs > 0 && s.news_secs > 0,
            "schedule intervals must be at least one second"
        );
        ensure!(self.feed.timeout_secs > 0, "feed timeout must be at least one second");
        ensure!(
            !self.feed.base_url.trim().is_empty(),
            "feed base_url must not be empty"
        );
        ensure!(
            self.charts.width > 0.0 && self.charts.height > 0.0,
            "chart size must be positive"
        );
        Ok(())
    }
}

/// Parse and validate a configuration TOML string.
pub fn load_config_str(toml_str: &str) -> anyhow::Result<DashboardConfig> {
    let cfg: DashboardConfig = from_str(toml_str).context("failed to parse dashboard TOML")?;
    cfg.validate().context("invalid dashboard configuration")?;
    Ok(cfg)
}

/// Read a configuration file from disk, parse and validate it.
///
/// See [`load_config_str`] for details.
pub fn load_config_path(path: impl AsRef<std::path::Path>) -> anyhow::Result<DashboardConfig> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read config file {}", path.as_ref().display()))?;
    load_config_str(&text)
}

#[cfg(test)]
mod tests {
    use dashboard_core::{ChartKey, Color};

    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = load_config_str("").unwrap();
        assert_eq!(cfg, DashboardConfig::default());
        assert_eq!(cfg.schedule.intervals(), ScheduleIntervals::default());
        assert_eq!(cfg.feed.timeout(), Duration::from_secs(8));
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = load_config_str(
            r##"
            [charts]
            default_range = "yearly"

            [palettes.usd]
            pos = "#000000"
            neg = "#111111"
            neu = "#222222"
            "##,
        )
        .unwrap();
        assert_eq!(cfg.charts.default_range, ChartRange::Yearly);
        assert_eq!(cfg.charts.width, 320.0);
        assert_eq!(cfg.palettes.get(ChartKey::Usd).pos, Color::rgb(0, 0, 0));
        assert_eq!(cfg.palettes.ons, PaletteSet::default().ons);
        assert_eq!(cfg.schedule, ScheduleConfig::default());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = load_config_str("[feed]\nbase_uri = \"http://x\"\n").unwrap_err();
        assert!(format!("{err:#}").contains("base_uri"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        let err = load_config_str("[schedule]\nmetrics_secs = 0\n").unwrap_err();
        assert!(format!("{err:#}").contains("at least one second"));
    }

    #[test]
    fn bad_color_is_rejected() {
        let err = load_config_str(
            r##"
            [palettes.ons]
            pos = "green"
            neg = "#ef4444"
            neu = "#f5c451"
            "##,
        )
        .unwrap_err();
        assert!(format!("{err:#}").contains("expected #rrggbb"));
    }
}
