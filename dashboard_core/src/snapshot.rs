//! Metrics and news snapshots, decoded once at the boundary.
//!
//! The endpoints return loosely shaped JSON where any field may be missing or
//! `null`. [`wire`] mirrors that shape with `Option` everywhere; the `From`
//! conversions below apply the documented defaults so the rest of the crate
//! only sees fully populated values:
//!
//! | field                         | default                         |
//! |-------------------------------|---------------------------------|
//! | quote `price` / `change`      | `0.0`                           |
//! | bank/market `alis` / `satis`  | `0.0` (side marked unavailable) |
//! | `spread_tl` / `spread_pct`    | `0.0`, also when non-finite     |
//! | `arbitrage`                   | `None`                          |
//! | `signal`                      | empty string                    |
//! | history arrays                | empty; `null` samples → `NaN`   |
//! | `arbitrage_dates`             | falls back to `dates`           |
//! | `status`                      | `offline`                       |

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{chart::ChartKey, series::Series};

/// Error returned when a payload is not valid JSON of the expected shape.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The metrics body could not be decoded.
    #[error("malformed metrics payload: {0}")]
    Metrics(#[source] serde_json::Error),
    /// The news body could not be decoded.
    #[error("malformed news payload: {0}")]
    News(#[source] serde_json::Error),
}

/// Whether the server reached its upstream sources.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FeedStatus {
    /// Fresh data.
    Live,
    /// Fallback or cached data.
    #[default]
    Offline,
}

impl FeedStatus {
    fn from_wire(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(s) if s.eq_ignore_ascii_case("live") => FeedStatus::Live,
            _ => FeedStatus::Offline,
        }
    }
}

/// Last price and percent change for one instrument.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quote {
    /// Last close.
    pub price: f64,
    /// Percent change against the previous close.
    pub change: f64,
}

/// The three tracked instruments.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Quotes {
    /// Spot ounce price (USD).
    pub ons: Quote,
    /// USD/TRY.
    pub usdtry: Quote,
    /// US 10 year yield.
    pub us10y: Quote,
}

/// A buy/sell quote pair in TRY.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BidAsk {
    /// Buying price (`alis`).
    pub bid: f64,
    /// Selling price (`satis`).
    pub ask: f64,
}

/// Local gram gold prices.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LocalPrices {
    /// Bank quote; `None` when the payload omitted it.
    pub bank: Option<BidAsk>,
    /// Grand Bazaar (market) quote; `None` when the payload omitted it.
    pub market: Option<BidAsk>,
    /// Upstream status reported by the server.
    pub status: FeedStatus,
}

/// Derived spread/arbitrage figures.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Analysis {
    /// Bank ask minus bank bid, in TRY. Always finite.
    pub spread_tl: f64,
    /// Spread as a percentage of the bank bid. Always finite.
    pub spread_pct: f64,
    /// Arbitrage figure if the server supplied a finite one.
    pub arbitrage: Option<f64>,
    /// Discrete trading signal label.
    pub signal: String,
}

/// Everything one metrics poll delivers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MetricsSnapshot {
    /// Instrument readings.
    pub quotes: Quotes,
    /// Local gram gold prices.
    pub local: LocalPrices,
    /// Chart series keyed by chart.
    pub series: IndexMap<ChartKey, Series>,
    /// Spread and signal.
    pub analysis: Analysis,
}

impl MetricsSnapshot {
    /// Decode a `/api/metrics` body.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        serde_json::from_str::<wire::MetricsPayload>(body)
            .map(Self::from)
            .map_err(DecodeError::Metrics)
    }

    /// Series for a chart; an empty series if the payload had none.
    pub fn series(&self, key: ChartKey) -> Series {
        self.series.get(&key).cloned().unwrap_or_default()
    }
}

/// One news headline. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewsItem {
    /// Headline.
    pub title: Option<String>,
    /// Turkish translation of the headline.
    pub title_tr: Option<String>,
    /// Publisher name.
    pub source: Option<String>,
    /// Article URL.
    pub link: Option<String>,
    /// Pre-formatted publish time.
    pub published: Option<String>,
}

/// Everything one news poll delivers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsSnapshot {
    /// Domestic headlines.
    pub national: Vec<NewsItem>,
    /// International headlines.
    pub international: Vec<NewsItem>,
    /// Upstream status.
    pub status: FeedStatus,
    /// Server-side refresh time (`HH:MM:SS`).
    pub updated_at: Option<String>,
}

impl NewsSnapshot {
    /// Decode a `/api/news` body.
    pub fn from_json(body: &str) -> Result<Self, DecodeError> {
        serde_json::from_str::<wire::NewsPayload>(body)
            .map(Self::from)
            .map_err(DecodeError::News)
    }
}

fn finite_or_zero(v: Option<f64>) -> f64 {
    v.filter(|x| x.is_finite()).unwrap_or(0.0)
}

impl From<wire::QuotePayload> for Quote {
    fn from(q: wire::QuotePayload) -> Self {
        Self {
            price: finite_or_zero(q.price),
            change: finite_or_zero(q.change),
        }
    }
}

impl From<wire::BidAskPayload> for BidAsk {
    fn from(p: wire::BidAskPayload) -> Self {
        Self {
            bid: finite_or_zero(p.alis),
            ask: finite_or_zero(p.satis),
        }
    }
}

impl From<wire::MetricsPayload> for MetricsSnapshot {
    fn from(p: wire::MetricsPayload) -> Self {
        let local = p.local.unwrap_or_default();
        let mut global = p.global.unwrap_or_default();
        let analysis = p.analysis.unwrap_or_default();
        let history = global.history.take().or(p.history).unwrap_or_default();

        let quote = |q: Option<wire::QuotePayload>| q.map(Quote::from).unwrap_or_default();
        let quotes = Quotes {
            ons: quote(global.ons),
            usdtry: quote(global.usdtry),
            us10y: quote(global.us10y),
        };

        let dates = history.dates.unwrap_or_default();
        let arbitrage_dates = history.arbitrage_dates.unwrap_or_else(|| dates.clone());
        let samples = |v: Option<Vec<Option<f64>>>| v.unwrap_or_default();

        let mut series = IndexMap::new();
        series.insert(
            ChartKey::Ons,
            Series::from_optional(dates.clone(), samples(history.ons_prices)),
        );
        series.insert(
            ChartKey::Usd,
            Series::from_optional(dates.clone(), samples(history.usd_prices)),
        );
        series.insert(
            ChartKey::Us10y,
            Series::from_optional(dates.clone(), samples(history.us10y_prices)),
        );
        series.insert(
            ChartKey::Gram,
            Series::from_optional(dates, samples(history.gram_prices)),
        );
        series.insert(
            ChartKey::Arbitrage,
            Series::from_optional(arbitrage_dates, samples(history.arbitrage_prices)),
        );

        Self {
            quotes,
            local: LocalPrices {
                bank: local.garanti.map(BidAsk::from),
                market: local.piyasa.map(BidAsk::from),
                status: FeedStatus::from_wire(local.status.as_deref()),
            },
            series,
            analysis: Analysis {
                spread_tl: finite_or_zero(analysis.spread_tl),
                spread_pct: finite_or_zero(analysis.spread_pct),
                arbitrage: analysis.arbitrage.filter(|v| v.is_finite()),
                signal: analysis.signal.unwrap_or_default(),
            },
        }
    }
}

impl From<wire::NewsPayload> for NewsSnapshot {
    fn from(p: wire::NewsPayload) -> Self {
        Self {
            national: p.national.unwrap_or_default(),
            international: p.international.unwrap_or_default(),
            status: FeedStatus::from_wire(p.status.as_deref()),
            updated_at: p.updated_at.filter(|s| !s.trim().is_empty()),
        }
    }
}

/// Raw payload shapes as served by the dashboard backend.
pub mod wire {
    use serde::Deserialize;

    use super::NewsItem;

    /// `/api/metrics` body.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct MetricsPayload {
        /// Local gram gold prices.
        pub local: Option<LocalPayload>,
        /// Global instruments and chart history.
        pub global: Option<GlobalPayload>,
        /// Derived spread figures.
        pub analysis: Option<AnalysisPayload>,
        /// Older servers put history at the top level.
        pub history: Option<HistoryPayload>,
    }

    /// `local` object.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct LocalPayload {
        /// Bank quote.
        pub garanti: Option<BidAskPayload>,
        /// Market quote.
        pub piyasa: Option<BidAskPayload>,
        /// `live` or `offline`.
        pub status: Option<String>,
    }

    /// `{alis, satis}` pair.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct BidAskPayload {
        /// Buy price.
        pub alis: Option<f64>,
        /// Sell price.
        pub satis: Option<f64>,
    }

    /// `global` object.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct GlobalPayload {
        /// Ounce quote.
        #[serde(rename = "ONS")]
        pub ons: Option<QuotePayload>,
        /// USD/TRY quote.
        #[serde(rename = "USDTRY")]
        pub usdtry: Option<QuotePayload>,
        /// US 10Y quote.
        #[serde(rename = "US10Y")]
        pub us10y: Option<QuotePayload>,
        /// Chart history.
        pub history: Option<HistoryPayload>,
    }

    /// `{price, change}` pair.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct QuotePayload {
        /// Last close.
        pub price: Option<f64>,
        /// Percent change.
        pub change: Option<f64>,
    }

    /// `history` object.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct HistoryPayload {
        /// Shared labels.
        pub dates: Option<Vec<String>>,
        /// Ounce closes.
        pub ons_prices: Option<Vec<Option<f64>>>,
        /// USD/TRY closes.
        pub usd_prices: Option<Vec<Option<f64>>>,
        /// US 10Y closes.
        pub us10y_prices: Option<Vec<Option<f64>>>,
        /// Gram gold closes.
        pub gram_prices: Option<Vec<Option<f64>>>,
        /// Arbitrage samples.
        pub arbitrage_prices: Option<Vec<Option<f64>>>,
        /// Labels for the arbitrage samples.
        pub arbitrage_dates: Option<Vec<String>>,
    }

    /// `analysis` object.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct AnalysisPayload {
        /// Spread in TRY.
        pub spread_tl: Option<f64>,
        /// Spread in percent.
        pub spread_pct: Option<f64>,
        /// Arbitrage figure.
        pub arbitrage: Option<f64>,
        /// Signal label.
        pub signal: Option<String>,
    }

    /// `/api/news` body.
    #[derive(Debug, Default, Deserialize)]
    #[serde(default)]
    pub struct NewsPayload {
        /// Domestic headlines.
        pub national: Option<Vec<NewsItem>>,
        /// International headlines.
        pub international: Option<Vec<NewsItem>>,
        /// `live` or `offline`.
        pub status: Option<String>,
        /// Refresh time.
        pub updated_at: Option<String>,
    }
}
