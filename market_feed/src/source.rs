//! Data source abstraction for the dashboard backend.
//!
//! [`MetricsSource`] and [`NewsSource`] are the two reads the dashboard
//! performs. They are async traits so the runtime can hold them as
//! `Arc<dyn …>` and swap in fakes under test.

use async_trait::async_trait;
use dashboard_core::{ChartRange, MetricsSnapshot, NewsSnapshot, snapshot::DecodeError};
use snafu::{Backtrace, Snafu};

/// Reads the metrics payload for a chart range.
#[async_trait]
pub trait MetricsSource: Send + Sync {
    /// Fetch and decode one metrics snapshot.
    async fn fetch_metrics(&self, range: ChartRange) -> Result<MetricsSnapshot, FeedError>;
}

/// Reads the news payload.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Fetch and decode one news snapshot.
    async fn fetch_news(&self) -> Result<NewsSnapshot, FeedError>;
}

/// Errors that can occur while building a feed.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FeedInitError {
    /// failed to init reqwest client
    #[snafu(display("Failed to build HTTP client: {source}"))]
    ClientBuild {
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The configured base URL cannot be used.
    #[snafu(display("Invalid base URL {url:?}: {message}"))]
    InvalidBaseUrl {
        url: String,
        message: String,
        backtrace: Backtrace,
    },
}

/// Errors that can occur during a single fetch.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum FeedError {
    /// Network failure or timeout.
    #[snafu(display("Request to {endpoint} failed: {source}"))]
    Reqwest {
        endpoint: String,
        source: reqwest::Error,
        backtrace: Backtrace,
    },

    /// The server answered with a non-success status.
    #[snafu(display("{endpoint} returned HTTP {status}: {body}"))]
    Status {
        endpoint: String,
        status: u16,
        body: String,
        backtrace: Backtrace,
    },

    /// The body was not the expected JSON.
    #[snafu(display("Could not decode {endpoint}: {source}"))]
    Decode {
        endpoint: String,
        source: DecodeError,
        backtrace: Backtrace,
    },
}

impl FeedError {
    /// Endpoint the failed request targeted.
    pub fn endpoint(&self) -> &str {
        match self {
            FeedError::Reqwest { endpoint, .. }
            | FeedError::Status { endpoint, .. }
            | FeedError::Decode { endpoint, .. } => endpoint,
        }
    }
}
