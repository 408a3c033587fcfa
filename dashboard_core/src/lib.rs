//! Chart-state, annotation and narrative engine for the gold market dashboard.
//!
//! The crate turns decoded metrics/news snapshots into display strings and
//! chart draw calls. Fetching data and putting pixels on a screen are left to
//! the caller: charts are drawn through the [`chart::RenderSurface`] trait and
//! text comes back as plain values in [`dashboard::DashboardView`].

#![deny(missing_docs)]

pub mod chart;
pub mod dashboard;
pub mod narrative;
pub mod palette;
pub mod range;
pub mod readout;
pub mod schedule;
pub mod series;
pub mod snapshot;
pub mod trend;

pub use chart::ChartKey;
pub use dashboard::{DashboardState, DashboardView, NewsView};
pub use palette::{Color, Palette, PaletteSet};
pub use range::ChartRange;
pub use series::Series;
pub use snapshot::{MetricsSnapshot, NewsItem, NewsSnapshot};
pub use trend::{Trend, classify};
