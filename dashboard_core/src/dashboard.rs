//! The single owner of everything the dashboard has rendered.
//!
//! [`DashboardState`] replaces page-level globals: the selected range, the
//! range the charts were last drawn for, the chart instances and the last
//! produced views all live here, and only the caller holding `&mut` can
//! change them.

use indexmap::IndexMap;
use tracing::{debug, info, warn};

use crate::{
    chart::{ChartKey, ChartLifecycleManager, ChartStyle, ChartUpdate, RenderSurface, SurfaceProvider},
    narrative::{market_commentary, news_summary},
    palette::PaletteSet,
    range::ChartRange,
    readout::{self, NewsLine, QuoteReadout},
    snapshot::{FeedStatus, MetricsSnapshot, NewsSnapshot},
    trend::classify,
};

/// Every text readout produced by one metrics refresh.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    /// Range the charts were drawn for.
    pub range: ChartRange,
    /// `Grafik aralığı: …` line.
    pub range_status: String,
    /// Spread in TRY.
    pub spread_value: String,
    /// Spread in percent.
    pub spread_percent: String,
    /// Spread card background.
    pub spread_tint: &'static str,
    /// Trading signal label.
    pub signal: String,
    /// Ounce readout.
    pub ons: QuoteReadout,
    /// USD/TRY readout.
    pub usdtry: QuoteReadout,
    /// US 10Y readout.
    pub us10y: QuoteReadout,
    /// Gram gold price.
    pub gram_price: String,
    /// Gram gold price as a number, for the calculator.
    pub gram_price_value: f64,
    /// Arbitrage figure.
    pub arbitrage: String,
    /// Bank vs. market ticker.
    pub hot_ticker: String,
    /// Market commentary paragraph.
    pub commentary: String,
    /// Upstream status of the local prices.
    pub status: FeedStatus,
    /// What happened to each chart.
    pub charts: IndexMap<ChartKey, ChartUpdate>,
}

/// Everything one news refresh produces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsView {
    /// Domestic headlines.
    pub national: Vec<NewsLine>,
    /// International headlines, with translations.
    pub international: Vec<NewsLine>,
    /// Digest paragraph.
    pub summary: String,
    /// `Son güncelleme: …` line.
    pub updated: String,
}

/// Explicit dashboard state, owned by the runtime loop.
pub struct DashboardState<S> {
    range: ChartRange,
    rendered_range: Option<ChartRange>,
    charts: ChartLifecycleManager<S>,
    last_view: Option<DashboardView>,
    last_news: Option<NewsView>,
    failures: u64,
}

impl<S: RenderSurface> Default for DashboardState<S> {
    fn default() -> Self {
        Self::new(ChartRange::default())
    }
}

impl<S: RenderSurface> DashboardState<S> {
    /// Fresh state with nothing rendered.
    pub fn new(range: ChartRange) -> Self {
        Self::with_charts(range, ChartLifecycleManager::new(ChartStyle::default()))
    }

    /// Fresh state with a preconfigured chart manager.
    pub fn with_charts(range: ChartRange, charts: ChartLifecycleManager<S>) -> Self {
        Self {
            range,
            rendered_range: None,
            charts,
            last_view: None,
            last_news: None,
            failures: 0,
        }
    }

    /// Currently selected range.
    pub fn range(&self) -> ChartRange {
        self.range
    }

    /// Range the charts were last drawn for, if any.
    pub fn rendered_range(&self) -> Option<ChartRange> {
        self.rendered_range
    }

    /// Select a range. Charts are only torn down when data for it arrives.
    ///
    /// Returns the status line for the new range.
    pub fn set_range(&mut self, range: ChartRange) -> String {
        if range != self.range {
            info!(from = %self.range, to = %range, "chart range changed");
        }
        self.range = range;
        readout::range_status(range)
    }

    /// Tear down every chart iff the charts were drawn for a different range.
    ///
    /// Nothing is reset before the first render. Returns whether a reset
    /// happened.
    pub fn prepare_range(&mut self, requested: ChartRange) -> bool {
        match self.rendered_range {
            Some(previous) if previous != requested => {
                let destroyed = self.charts.reset_all();
                debug!(%previous, %requested, destroyed, "range changed; charts reset");
                self.rendered_range = None;
                true
            }
            _ => false,
        }
    }

    /// Apply a metrics snapshot fetched for `requested`.
    ///
    /// Every chart key is updated with its trend-colored series, then all
    /// readouts and the commentary are rebuilt.
    pub fn apply_metrics<P>(
        &mut self,
        snapshot: &MetricsSnapshot,
        requested: ChartRange,
        provider: &mut P,
        palettes: &PaletteSet,
    ) -> &DashboardView
    where
        P: SurfaceProvider<Surface = S>,
    {
        self.prepare_range(requested);

        let mut charts = IndexMap::with_capacity(ChartKey::ALL.len());
        for key in ChartKey::ALL {
            let (labels, values) = snapshot.series(key).into_parts();
            let color = classify(&values, palettes.get(key));
            let outcome = self.charts.update(key, provider, labels, values, color);
            charts.insert(key, outcome);
        }
        self.rendered_range = Some(requested);

        let quotes = &snapshot.quotes;
        let analysis = &snapshot.analysis;
        let local = &snapshot.local;
        let view = DashboardView {
            range: requested,
            range_status: readout::range_status(requested),
            spread_value: readout::spread_value(analysis),
            spread_percent: readout::spread_percent(analysis),
            spread_tint: readout::spread_tint(analysis.spread_pct),
            signal: analysis.signal.clone(),
            ons: readout::quote(&quotes.ons),
            usdtry: readout::quote(&quotes.usdtry),
            us10y: readout::quote(&quotes.us10y),
            gram_price: readout::gram_price(local),
            gram_price_value: readout::gram_price_value(local),
            arbitrage: readout::arbitrage(analysis, local),
            hot_ticker: readout::hot_ticker(local),
            commentary: market_commentary(
                &quotes.ons,
                &quotes.usdtry,
                &quotes.us10y,
                analysis.spread_pct,
            ),
            status: local.status,
            charts,
        };
        debug!(range = %requested, status = ?view.status, "metrics applied");
        self.last_view.insert(view)
    }

    /// Apply a news snapshot.
    pub fn apply_news(&mut self, snapshot: &NewsSnapshot) -> &NewsView {
        let view = NewsView {
            national: readout::news_lines(&snapshot.national, false),
            international: readout::news_lines(&snapshot.international, true),
            summary: news_summary(&snapshot.national, &snapshot.international),
            updated: readout::news_updated(snapshot.updated_at.as_deref()),
        };
        debug!(
            national = snapshot.national.len(),
            international = snapshot.international.len(),
            "news applied"
        );
        self.last_news.insert(view)
    }

    /// Note a failed refresh. Rendered state is left exactly as it was.
    pub fn record_failure(&mut self, what: &str, error: &dyn std::error::Error) {
        self.failures += 1;
        warn!(task = what, failures = self.failures, error = %error, "refresh failed; keeping previous values");
    }

    /// Last metrics view, if any refresh succeeded.
    pub fn last_view(&self) -> Option<&DashboardView> {
        self.last_view.as_ref()
    }

    /// Last news view, if any refresh succeeded.
    pub fn last_news(&self) -> Option<&NewsView> {
        self.last_news.as_ref()
    }

    /// Failed refreshes so far.
    pub fn failures(&self) -> u64 {
        self.failures
    }

    /// Read-only access to the charts.
    pub fn charts(&self) -> &ChartLifecycleManager<S> {
        &self.charts
    }
}
