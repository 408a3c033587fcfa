#![allow(dead_code)]

use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use async_trait::async_trait;
use dashboard_core::{
    ChartRange, DashboardView, MetricsSnapshot, NewsSnapshot, NewsView, schedule::TaskKind,
};
use market_feed::{
    FeedError, MetricsSource, NewsSource, Presenter,
    source::{DecodeSnafu, StatusSnafu},
};
use snafu::ResultExt;

pub const METRICS_JSON: &str = r#"{
    "local": {
        "garanti": {"alis": 2950.5, "satis": 3080.0},
        "piyasa": {"alis": 3000.0, "satis": 3010.25},
        "status": "live"
    },
    "global": {
        "ONS": {"price": 2650.4, "change": 0.5},
        "USDTRY": {"price": 34.21, "change": -0.6},
        "US10Y": {"price": 4.41, "change": 0.0},
        "history": {
            "dates": ["01 Eki", "02 Eki", "03 Eki"],
            "ons_prices": [2600.0, 2640.0, 2650.4],
            "usd_prices": [34.3, 34.2, 34.21],
            "us10y_prices": [4.41, 4.5, 4.41],
            "gram_prices": [2890.0, 2920.5, 3010.25],
            "arbitrage_prices": [12.0, 30.5, 59.75],
            "arbitrage_dates": ["01 Eki", "02 Eki", "03 Eki"]
        }
    },
    "analysis": {"spread_tl": 129.5, "spread_pct": 1.0, "signal": "AL"}
}"#;

pub const NEWS_JSON: &str = r#"{
    "national": [{"title": "Gram altın rekor kırdı", "source": "AA"}],
    "international": [{"title": "Fed holds rates", "title_tr": "Fed faizi sabit tuttu"}],
    "updated_at": "10:15:00"
}"#;

/// Metrics source returning [`METRICS_JSON`] after an optional delay.
#[derive(Default)]
pub struct FakeMetrics {
    pub delay: Duration,
    pub fail: bool,
    ranges: Mutex<Vec<ChartRange>>,
}

impl FakeMetrics {
    pub fn ok() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self {
            fail: true,
            ..Self::default()
        })
    }

    pub fn slow(delay: Duration) -> Arc<Self> {
        Arc::new(Self {
            delay,
            ..Self::default()
        })
    }

    /// Ranges requested so far, in call order.
    pub fn ranges(&self) -> Vec<ChartRange> {
        self.ranges.lock().unwrap().clone()
    }
}

#[async_trait]
impl MetricsSource for FakeMetrics {
    async fn fetch_metrics(&self, range: ChartRange) -> Result<MetricsSnapshot, FeedError> {
        self.ranges.lock().unwrap().push(range);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if self.fail {
            return StatusSnafu {
                endpoint: "/api/metrics",
                status: 503u16,
                body: "maintenance",
            }
            .fail();
        }
        MetricsSnapshot::from_json(METRICS_JSON).context(DecodeSnafu {
            endpoint: "/api/metrics",
        })
    }
}

/// News source returning [`NEWS_JSON`].
#[derive(Default)]
pub struct FakeNews {
    calls: Mutex<u32>,
}

impl FakeNews {
    pub fn calls(&self) -> u32 {
        *self.calls.lock().unwrap()
    }
}

#[async_trait]
impl NewsSource for FakeNews {
    async fn fetch_news(&self) -> Result<NewsSnapshot, FeedError> {
        *self.calls.lock().unwrap() += 1;
        NewsSnapshot::from_json(NEWS_JSON).context(DecodeSnafu {
            endpoint: "/api/news",
        })
    }
}

/// Presenter that keeps everything it is shown.
#[derive(Default)]
pub struct RecordingPresenter {
    pub dashboards: Vec<DashboardView>,
    pub news: Vec<NewsView>,
    pub clocks: Vec<String>,
    pub ranges: Vec<String>,
    pub calculations: Vec<(f64, String)>,
    pub failures: Vec<(TaskKind, String)>,
}

impl Presenter for RecordingPresenter {
    fn show_dashboard(&mut self, view: &DashboardView) {
        self.dashboards.push(view.clone());
    }

    fn show_news(&mut self, view: &NewsView) {
        self.news.push(view.clone());
    }

    fn show_clock(&mut self, time: &str) {
        self.clocks.push(time.to_string());
    }

    fn show_range(&mut self, status: &str) {
        self.ranges.push(status.to_string());
    }

    fn show_calculation(&mut self, grams: f64, result: &str) {
        self.calculations.push((grams, result.to_string()));
    }

    fn show_failure(&mut self, task: TaskKind, error: &FeedError) {
        self.failures.push((task, error.to_string()));
    }
}
