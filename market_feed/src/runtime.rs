//! The dashboard event loop.
//!
//! One loop owns the [`DashboardState`]. Fetches run as spawned tasks and
//! report back over a channel; only the loop applies their results, so the
//! state has a single mutator. The [`Schedule`] guarantees at most one
//! metrics fetch and one news fetch are in flight at a time.

use std::{str::FromStr, sync::Arc, time::Duration};

use chrono::Local;
use dashboard_core::{
    ChartRange, DashboardState, DashboardView, MetricsSnapshot, NewsSnapshot, NewsView,
    PaletteSet,
    chart::SurfaceProvider,
    readout,
    schedule::{Schedule, ScheduleIntervals, TaskKind},
};
use snafu::Snafu;
use tokio::{
    sync::mpsc,
    time::{Instant, sleep_until},
};
use tracing::{debug, info};

use crate::source::{FeedError, MetricsSource, NewsSource};

/// A user request fed into the loop.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Fetch metrics now.
    Refresh,
    /// Switch the chart range and fetch metrics for it.
    SetRange(ChartRange),
    /// Convert grams of gold to TRY at the last shown gram price.
    Calculate(f64),
    /// Stop the loop.
    Quit,
}

/// Error returned for an unrecognised command line.
#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(display(
    "unknown command {input:?} (try: refresh, daily, weekly, yearly, calc <grams>, quit)"
))]
pub struct CommandParseError {
    input: String,
}

impl FromStr for Command {
    type Err = CommandParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim().to_lowercase();
        if let Some((head, rest)) = token.split_once(char::is_whitespace) {
            if matches!(head, "calc" | "hesapla") {
                return Ok(Command::Calculate(parse_grams(rest)));
            }
        }
        match token.as_str() {
            "calc" | "hesapla" => Ok(Command::Calculate(0.0)),
            "r" | "refresh" | "güncelle" => Ok(Command::Refresh),
            "q" | "quit" | "exit" => Ok(Command::Quit),
            other => other
                .parse::<ChartRange>()
                .map(Command::SetRange)
                .map_err(|_| CommandParseSnafu { input: s.trim() }.build()),
        }
    }
}

/// Gram amount typed by the user; anything unparsable counts as zero.
fn parse_grams(raw: &str) -> f64 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|g| g.is_finite())
        .unwrap_or(0.0)
}

/// Where the loop sends what it produced.
pub trait Presenter {
    /// A metrics refresh was applied.
    fn show_dashboard(&mut self, view: &DashboardView);

    /// A news refresh was applied.
    fn show_news(&mut self, view: &NewsView);

    /// The clock ticked.
    fn show_clock(&mut self, time: &str);

    /// The selected range changed (also called once at startup).
    fn show_range(&mut self, status: &str);

    /// Result of a gram-to-TRY calculation, already formatted.
    fn show_calculation(&mut self, grams: f64, result: &str);

    /// A refresh failed; previously shown values stay valid.
    fn show_failure(&mut self, _task: TaskKind, _error: &FeedError) {}
}

/// Counters collected over one run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Metrics snapshots applied.
    pub metrics_applied: u64,
    /// News snapshots applied.
    pub news_applied: u64,
    /// Failed fetches.
    pub failures: u64,
    /// Clock ticks shown.
    pub clock_ticks: u64,
    /// Metrics ticks skipped because a fetch was still running.
    pub skipped_metrics: u64,
    /// News ticks skipped because a fetch was still running.
    pub skipped_news: u64,
}

enum Outcome {
    Metrics {
        range: ChartRange,
        result: Result<MetricsSnapshot, FeedError>,
    },
    News(Result<NewsSnapshot, FeedError>),
}

/// Drives the periodic tasks against a feed and a set of chart surfaces.
pub struct Runtime<P: SurfaceProvider> {
    metrics: Arc<dyn MetricsSource>,
    news: Arc<dyn NewsSource>,
    provider: P,
    palettes: PaletteSet,
    intervals: ScheduleIntervals,
    state: DashboardState<P::Surface>,
}

impl<P: SurfaceProvider> Runtime<P> {
    /// Runtime with default palettes, intervals and range.
    pub fn new(metrics: Arc<dyn MetricsSource>, news: Arc<dyn NewsSource>, provider: P) -> Self {
        Self {
            metrics,
            news,
            provider,
            palettes: PaletteSet::default(),
            intervals: ScheduleIntervals::default(),
            state: DashboardState::new(ChartRange::default()),
        }
    }

    /// Use these chart palettes.
    pub fn with_palettes(mut self, palettes: PaletteSet) -> Self {
        self.palettes = palettes;
        self
    }

    /// Use these task periods.
    pub fn with_intervals(mut self, intervals: ScheduleIntervals) -> Self {
        self.intervals = intervals;
        self
    }

    /// Start on this range.
    pub fn with_range(mut self, range: ChartRange) -> Self {
        self.state.set_range(range);
        self
    }

    /// Dashboard state, for inspection.
    pub fn state(&self) -> &DashboardState<P::Surface> {
        &self.state
    }

    /// The surface provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Fetch metrics and news once, apply both, and return.
    pub async fn run_once<Pr: Presenter>(&mut self, presenter: &mut Pr) -> RunSummary {
        let mut summary = RunSummary::default();
        let range = self.state.range();
        presenter.show_range(&readout::range_status(range));
        presenter.show_clock(&readout::clock(&Local::now()));
        summary.clock_ticks += 1;

        let (metrics, news) = tokio::join!(self.metrics.fetch_metrics(range), self.news.fetch_news());
        self.complete(Outcome::Metrics { range, result: metrics }, None, presenter, &mut summary);
        self.complete(Outcome::News(news), None, presenter, &mut summary);
        summary
    }

    /// Run until [`Command::Quit`] arrives.
    ///
    /// A closed command channel does not stop the loop.
    pub async fn run<Pr: Presenter>(
        &mut self,
        presenter: &mut Pr,
        mut commands: mpsc::Receiver<Command>,
    ) -> RunSummary {
        let mut summary = RunSummary::default();
        let (tx, mut outcomes) = mpsc::channel::<Outcome>(8);
        let mut schedule = Schedule::new(Instant::now().into_std(), self.intervals);
        let mut commands_open = true;

        info!(range = %self.state.range(), "dashboard loop started");
        presenter.show_range(&readout::range_status(self.state.range()));

        loop {
            let now = Instant::now();
            for task in schedule.due(now.into_std()) {
                self.start(task, &mut schedule, &tx, presenter, &mut summary);
            }
            let deadline = schedule
                .next_deadline()
                .map(Instant::from_std)
                .unwrap_or_else(|| now + Duration::from_secs(1));

            tokio::select! {
                _ = sleep_until(deadline) => {}
                Some(outcome) = outcomes.recv() => {
                    self.complete(outcome, Some(&mut schedule), presenter, &mut summary);
                }
                command = commands.recv(), if commands_open => match command {
                    None => {
                        debug!("command channel closed");
                        commands_open = false;
                    }
                    Some(Command::Quit) => break,
                    Some(Command::Refresh) => {
                        schedule.trigger(TaskKind::MetricsRefresh, Instant::now().into_std());
                    }
                    Some(Command::SetRange(range)) => {
                        presenter.show_range(&self.state.set_range(range));
                        schedule.trigger(TaskKind::MetricsRefresh, Instant::now().into_std());
                    }
                    Some(Command::Calculate(grams)) => {
                        presenter.show_calculation(grams, &self.calculate(grams));
                    }
                },
            }
        }

        summary.skipped_metrics = schedule.skipped(TaskKind::MetricsRefresh);
        summary.skipped_news = schedule.skipped(TaskKind::NewsRefresh);
        info!(?summary, "dashboard loop stopped");
        summary
    }

    /// Gram-to-TRY at the gram price of the last applied metrics (zero
    /// before the first one).
    pub fn calculate(&self, grams: f64) -> String {
        let price = self
            .state
            .last_view()
            .map_or(0.0, |view| view.gram_price_value);
        readout::gram_to_try(grams, price)
    }

    fn start<Pr: Presenter>(
        &mut self,
        task: TaskKind,
        schedule: &mut Schedule,
        tx: &mpsc::Sender<Outcome>,
        presenter: &mut Pr,
        summary: &mut RunSummary,
    ) {
        match task {
            TaskKind::ClockTick => {
                presenter.show_clock(&readout::clock(&Local::now()));
                summary.clock_ticks += 1;
            }
            TaskKind::MetricsRefresh => {
                schedule.begin(task);
                let range = self.state.range();
                let source = Arc::clone(&self.metrics);
                let tx = tx.clone();
                debug!(%range, "metrics fetch started");
                tokio::spawn(async move {
                    let result = source.fetch_metrics(range).await;
                    let _ = tx.send(Outcome::Metrics { range, result }).await;
                });
            }
            TaskKind::NewsRefresh => {
                schedule.begin(task);
                let source = Arc::clone(&self.news);
                let tx = tx.clone();
                debug!("news fetch started");
                tokio::spawn(async move {
                    let result = source.fetch_news().await;
                    let _ = tx.send(Outcome::News(result)).await;
                });
            }
        }
    }

    fn complete<Pr: Presenter>(
        &mut self,
        outcome: Outcome,
        schedule: Option<&mut Schedule>,
        presenter: &mut Pr,
        summary: &mut RunSummary,
    ) {
        let task = match &outcome {
            Outcome::Metrics { .. } => TaskKind::MetricsRefresh,
            Outcome::News(_) => TaskKind::NewsRefresh,
        };
        if let Some(schedule) = schedule {
            schedule.finish(task, Instant::now().into_std());
        }

        match outcome {
            Outcome::Metrics {
                range,
                result: Ok(snapshot),
            } => {
                let view =
                    self.state
                        .apply_metrics(&snapshot, range, &mut self.provider, &self.palettes);
                presenter.show_dashboard(view);
                summary.metrics_applied += 1;
            }
            Outcome::News(Ok(snapshot)) => {
                presenter.show_news(self.state.apply_news(&snapshot));
                summary.news_applied += 1;
            }
            Outcome::Metrics { result: Err(e), .. } | Outcome::News(Err(e)) => {
                self.state.record_failure(&task.to_string(), &e);
                presenter.show_failure(task, &e);
                summary.failures += 1;
            }
        }
    }
}
