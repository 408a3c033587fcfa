//! Terminal output and on-disk SVG charts.

use std::{
    io::{self, Write},
    path::PathBuf,
};

use dashboard_core::{
    ChartKey, DashboardView, NewsView,
    chart::{SurfaceProvider, svg::SvgSurface},
    readout::NewsLine,
    schedule::TaskKind,
    snapshot::FeedStatus,
};
use tracing::{debug, warn};

use crate::{runtime::Presenter, source::FeedError};

/// Hands out sized [`SvgSurface`]s and writes each rendered chart to
/// `<dir>/<key>.svg`.
///
/// Without a directory no surface is handed out and every chart update is
/// skipped, which is how a page without the canvas element behaves.
#[derive(Debug, Clone)]
pub struct SvgDirectory {
    dir: Option<PathBuf>,
    width: f64,
    height: f64,
    written: u64,
}

impl SvgDirectory {
    /// Provider writing into `dir` (if any) at the given pixel size.
    pub fn new(dir: Option<PathBuf>, width: f64, height: f64) -> Self {
        Self {
            dir,
            width,
            height,
            written: 0,
        }
    }

    /// Files written so far.
    pub fn written(&self) -> u64 {
        self.written
    }

    /// Where the chart for `key` is written.
    pub fn path_for(&self, key: ChartKey) -> Option<PathBuf> {
        self.dir
            .as_ref()
            .map(|dir| dir.join(format!("{}.svg", key.as_str())))
    }
}

impl SurfaceProvider for SvgDirectory {
    type Surface = SvgSurface;

    fn surface_for(&mut self, key: ChartKey) -> Option<SvgSurface> {
        self.dir.as_ref()?;
        Some(SvgSurface::with_size(key.as_str(), self.width, self.height))
    }

    fn present(&mut self, key: ChartKey, surface: &SvgSurface) {
        let Some(path) = self.path_for(key) else {
            return;
        };
        if let Some(parent) = path.parent() {
            if let Err(e) = std::fs::create_dir_all(parent) {
                warn!(path = %parent.display(), error = %e, "cannot create chart directory");
                return;
            }
        }
        match std::fs::write(&path, surface.to_svg()) {
            Ok(()) => {
                self.written += 1;
                debug!(path = %path.display(), "chart written");
            }
            Err(e) => warn!(path = %path.display(), error = %e, "cannot write chart"),
        }
    }
}

/// Plain-text presenter.
#[derive(Debug)]
pub struct TerminalPresenter<W> {
    out: W,
    show_clock: bool,
}

impl TerminalPresenter<io::Stdout> {
    /// Presenter printing to stdout.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalPresenter<W> {
    /// Presenter writing to `out`. Clock ticks are not printed.
    pub fn new(out: W) -> Self {
        Self {
            out,
            show_clock: false,
        }
    }

    /// Also print a line for every clock tick.
    pub fn with_clock(mut self, on: bool) -> Self {
        self.show_clock = on;
        self
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|()| self.out.flush()) {
            warn!(error = %e, "terminal write failed");
        }
    }
}

fn status_label(status: FeedStatus) -> &'static str {
    match status {
        FeedStatus::Live => "canlı",
        FeedStatus::Offline => "çevrimdışı",
    }
}

fn write_news(out: &mut String, heading: &str, lines: &[NewsLine]) {
    out.push_str(heading);
    out.push('\n');
    for line in lines {
        out.push_str("  - ");
        out.push_str(&line.title);
        if !line.meta.is_empty() {
            out.push(' ');
            out.push_str(&line.meta);
        }
        if let Some(link) = &line.link {
            out.push_str(" <");
            out.push_str(link);
            out.push('>');
        }
        out.push('\n');
    }
}

impl<W: Write> Presenter for TerminalPresenter<W> {
    fn show_dashboard(&mut self, view: &DashboardView) {
        let charts = view
            .charts
            .iter()
            .map(|(key, update)| format!("{key}={update:?}"))
            .collect::<Vec<_>>()
            .join(" ");
        let text = format!(
            "== Piyasa ({}) ==\n\
             ONS    {:>10} {:>7} [{}]\n\
             USDTRY {:>10} {:>7} [{}]\n\
             US10Y  {:>10} {:>7} [{}]\n\
             Gram   {:>10}   Arbitraj {}\n\
             Makas  {} ({}) sinyal {}\n\
             {}\n\
             {}\n\
             {}\n\
             grafikler: {}\n",
            status_label(view.status),
            view.ons.price,
            view.ons.change,
            view.ons.class.as_str(),
            view.usdtry.price,
            view.usdtry.change,
            view.usdtry.class.as_str(),
            view.us10y.price,
            view.us10y.change,
            view.us10y.class.as_str(),
            view.gram_price,
            view.arbitrage,
            view.spread_value,
            view.spread_percent,
            view.signal,
            view.range_status,
            view.hot_ticker,
            view.commentary,
            charts,
        );
        self.emit(&text);
    }

    fn show_news(&mut self, view: &NewsView) {
        let mut text = String::from("== Haberler ==\n");
        write_news(&mut text, "Yurt içi:", &view.national);
        write_news(&mut text, "Yurt dışı:", &view.international);
        text.push_str(&view.summary);
        text.push('\n');
        text.push_str(&view.updated);
        text.push('\n');
        self.emit(&text);
    }

    fn show_clock(&mut self, time: &str) {
        if self.show_clock {
            self.emit(&format!("{time}\n"));
        }
    }

    fn show_range(&mut self, status: &str) {
        self.emit(&format!("{status}\n"));
    }

    fn show_calculation(&mut self, grams: f64, result: &str) {
        self.emit(&format!("{grams} gr = {result} TL\n"));
    }

    fn show_failure(&mut self, task: TaskKind, error: &FeedError) {
        self.emit(&format!("! {task} güncellenemedi: {error}\n"));
    }
}
