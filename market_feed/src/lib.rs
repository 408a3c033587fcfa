//! Fetch layer, configuration and runtime loop for the gold market dashboard.
//!
//! [`dashboard_core`] owns the state and all formatting; this crate feeds it.
//! [`http::HttpFeed`] polls the dashboard backend, [`runtime::Runtime`] drives
//! the periodic tasks on a single tokio thread, and [`present`] turns views
//! into terminal output and SVG files.

#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod http;
pub mod present;
pub mod runtime;
pub mod source;

pub use config::DashboardConfig;
pub use http::HttpFeed;
pub use runtime::{Command, Presenter, Runtime, RunSummary};
pub use source::{FeedError, FeedInitError, MetricsSource, NewsSource};
