//! The chart range selector.
//!
//! A [`ChartRange`] is the token sent to the metrics endpoint (`?range=daily`)
//! and the only thing that triggers a full chart teardown when it changes.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned for an unknown range token.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown chart range: {0:?} (expected daily, weekly or yearly)")]
pub struct RangeParseError(pub String);

/// Historical granularity of the charts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartRange {
    /// One month of daily closes.
    #[default]
    Daily,
    /// Six months of weekly closes.
    Weekly,
    /// One year of weekly closes.
    Yearly,
}

impl ChartRange {
    /// Every range, in selector order.
    pub const ALL: [ChartRange; 3] = [ChartRange::Daily, ChartRange::Weekly, ChartRange::Yearly];

    /// Wire token for the `range` query parameter.
    pub fn token(&self) -> &'static str {
        match self {
            ChartRange::Daily => "daily",
            ChartRange::Weekly => "weekly",
            ChartRange::Yearly => "yearly",
        }
    }

    /// Human label shown in the range status line.
    pub fn label(&self) -> &'static str {
        match self {
            ChartRange::Daily => "Günlük",
            ChartRange::Weekly => "Haftalık",
            ChartRange::Yearly => "Yıllık",
        }
    }
}

impl fmt::Display for ChartRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.token())
    }
}

impl FromStr for ChartRange {
    type Err = RangeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" | "d" => Ok(ChartRange::Daily),
            "weekly" | "w" => Ok(ChartRange::Weekly),
            "yearly" | "y" => Ok(ChartRange::Yearly),
            _ => Err(RangeParseError(s.to_string())),
        }
    }
}
