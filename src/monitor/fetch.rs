//! HTTP fetch abstraction.
//!
//! The poller and identity resolver fetch through the [`Fetcher`]
//! trait so tests can substitute an in-memory fake. The real
//! implementation wraps a shared `reqwest` client and counts every
//! request on the busy gauge.

use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use url::Url;

use super::busy::BusyGauge;

/// A JSON-over-HTTP fetch seam.
#[async_trait]
pub trait Fetcher: Send + Sync {
    /// GET the URL and parse the body as JSON.
    async fn get_json(&self, url: &Url) -> Result<Value>;
}

/// The production fetcher: one shared `reqwest` client, every request
/// tracked on the busy gauge.
///
/// # Example
///
/// ```no_run
/// use flowscope::monitor::{BusyGauge, Fetcher, HttpFetcher};
/// use url::Url;
///
/// # tokio_test::block_on(async {
/// let busy = BusyGauge::new();
/// let fetcher = HttpFetcher::new(busy.clone()).unwrap();
/// let url = Url::parse("http://localhost:8080/mon-p3").unwrap();
/// let payload = fetcher.get_json(&url).await;
/// assert!(!busy.is_busy());
/// # });
/// ```
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: reqwest::Client,
    busy: BusyGauge,
}

impl HttpFetcher {
    pub fn new(busy: BusyGauge) -> Result<Self> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client, busy })
    }
}

#[async_trait]
impl Fetcher for HttpFetcher {
    async fn get_json(&self, url: &Url) -> Result<Value> {
        let _guard = self.busy.track();
        let response = self.client.get(url.clone()).send().await?.error_for_status()?;
        Ok(response.json().await?)
    }
}
