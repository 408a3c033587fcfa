//! `reqwest` implementation of the metrics and news sources.

use std::time::Duration;

use async_trait::async_trait;
use dashboard_core::{ChartRange, MetricsSnapshot, NewsSnapshot};
use reqwest::{Client, Url, header};
use snafu::{ResultExt, ensure};
use tracing::debug;

use crate::source::{
    ClientBuildSnafu, DecodeSnafu, FeedError, FeedInitError, InvalidBaseUrlSnafu, MetricsSource,
    NewsSource, ReqwestSnafu, StatusSnafu,
};

const METRICS_PATH: &str = "api/metrics";
const NEWS_PATH: &str = "api/news";
const MAX_ERROR_BODY: usize = 200;

/// Polls the dashboard backend over HTTP.
#[derive(Debug, Clone)]
pub struct HttpFeed {
    client: Client,
    metrics_url: Url,
    news_url: Url,
}

impl HttpFeed {
    /// Build a feed for `base_url` (e.g. `http://127.0.0.1:5000`).
    ///
    /// A missing trailing slash is added so the API paths are appended to
    /// the base path instead of replacing its last segment.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FeedInitError> {
        let trimmed = base_url.trim();
        let mut base = Url::parse(trimmed).map_err(|e| {
            InvalidBaseUrlSnafu {
                url: trimmed,
                message: e.to_string(),
            }
            .build()
        })?;
        ensure!(
            matches!(base.scheme(), "http" | "https"),
            InvalidBaseUrlSnafu {
                url: trimmed,
                message: format!("unsupported scheme {:?}", base.scheme()),
            }
        );
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let join = |path: &str| {
            base.join(path).map_err(|e| {
                InvalidBaseUrlSnafu {
                    url: trimmed,
                    message: e.to_string(),
                }
                .build()
            })
        };
        let metrics_url = join(METRICS_PATH)?;
        let news_url = join(NEWS_PATH)?;

        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context(ClientBuildSnafu)?;

        Ok(Self {
            client,
            metrics_url,
            news_url,
        })
    }

    /// Full metrics URL without the range query.
    pub fn metrics_url(&self) -> &Url {
        &self.metrics_url
    }

    /// Full news URL.
    pub fn news_url(&self) -> &Url {
        &self.news_url
    }

    async fn get_text(&self, url: &Url, query: &[(&str, &str)]) -> Result<String, FeedError> {
        let endpoint = url.path().to_string();
        let response = self
            .client
            .get(url.clone())
            .query(query)
            .header(header::CACHE_CONTROL, "no-store")
            .send()
            .await
            .context(ReqwestSnafu {
                endpoint: endpoint.as_str(),
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return StatusSnafu {
                endpoint,
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect::<String>(),
            }
            .fail();
        }

        let text = response.text().await.context(ReqwestSnafu {
            endpoint: endpoint.as_str(),
        })?;
        debug!(%endpoint, bytes = text.len(), "fetched");
        Ok(text)
    }
}

#[async_trait]
impl MetricsSource for HttpFeed {
    async fn fetch_metrics(&self, range: ChartRange) -> Result<MetricsSnapshot, FeedError> {
        let body = self
            .get_text(&self.metrics_url, &[("range", range.token())])
            .await?;
        MetricsSnapshot::from_json(&body).context(DecodeSnafu {
            endpoint: self.metrics_url.path(),
        })
    }
}

#[async_trait]
impl NewsSource for HttpFeed {
    async fn fetch_news(&self) -> Result<NewsSnapshot, FeedError> {
        let body = self.get_text(&self.news_url, &[]).await?;
        NewsSnapshot::from_json(&body).context(DecodeSnafu {
            endpoint: self.news_url.path(),
        })
    }
}
