//! Metric endpoint addressing and response rendering.
//!
//! Derives, per element kind, the URL a hover session polls and the
//! cadence it polls at, and turns raw JSON responses into popup
//! content. Pipes and stores share the throughput schema; processes
//! use resource-usage records keyed by pid.

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::Value;
use url::Url;

use crate::diagram::{ElementKind, GraphElement};
use crate::format::{ThroughputSample, ThroughputView};
use crate::popup::{PopupContent, ProcessRecord};

/// Default cadence for pipe and store throughput polling. Throughput is
/// bursty and needs sub-second refresh to feel live.
pub const PIPE_CADENCE: Duration = Duration::from_millis(500);

/// Default cadence for process resource-usage polling. Resource usage
/// changes slowly, so a slower cadence reduces endpoint load.
pub const PROCESS_CADENCE: Duration = Duration::from_millis(3000);

/// Polling cadences per element kind.
#[derive(Debug, Clone, Copy)]
pub struct Cadences {
    pub pipe: Duration,
    pub process: Duration,
}

impl Default for Cadences {
    fn default() -> Self {
        Self {
            pipe: PIPE_CADENCE,
            process: PROCESS_CADENCE,
        }
    }
}

impl Cadences {
    /// Cadence for an element of the given kind. Stores poll at the
    /// pipe cadence; they share the throughput schema.
    pub fn for_kind(&self, kind: ElementKind) -> Duration {
        match kind {
            ElementKind::PipeEdge | ElementKind::StoreNode => self.pipe,
            ElementKind::ProcessNode => self.process,
        }
    }
}

/// URL derivation rooted at the monitoring endpoint base.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Endpoints {
    pub fn new(base: Url) -> Self {
        Self { base }
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Throughput endpoint for a pipe edge.
    pub fn pipe_url(&self, edge_id: &str) -> Result<Url> {
        self.join(&format!("mon-{}", edge_id))
    }

    /// Throughput endpoint for a store node (metric key already has the
    /// `store:` prefix stripped).
    pub fn store_url(&self, store_key: &str) -> Result<Url> {
        self.join(&format!("mon-nps-{}", store_key))
    }

    /// Resource-usage endpoint for a resolved process id.
    pub fn rusage_url(&self, pid: i32) -> Result<Url> {
        let mut url = self.join("rusage")?;
        url.set_query(Some(&format!("pid={}", pid)));
        Ok(url)
    }

    /// Identity-lookup endpoint for a process node.
    pub fn pid_url(&self, node_id: &str) -> Result<Url> {
        self.join(&format!("pid-{}.json", node_id))
    }

    /// Metric URL for an element, given its kind and the resolved pid
    /// for process nodes.
    pub fn metric_url(&self, element: &GraphElement, pid: Option<i32>) -> Result<Option<Url>> {
        match element.kind {
            ElementKind::PipeEdge => self.pipe_url(&element.metric_key).map(Some),
            ElementKind::StoreNode => self.store_url(&element.metric_key).map(Some),
            // No pid, no request.
            ElementKind::ProcessNode => match pid {
                Some(pid) => self.rusage_url(pid).map(Some),
                None => Ok(None),
            },
        }
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .with_context(|| format!("deriving endpoint URL for {}", path))
    }
}

/// Turns a raw JSON response into popup content, per element kind.
#[derive(Debug, Clone, Copy)]
pub enum ContentRenderer {
    /// `{ nbytes, nlines, rtime, data }`, formatted with the given
    /// record truncation limit.
    Throughput { record_limit: usize },
    /// Array of process records; the endpoint pads the tail with
    /// nulls, which terminate the list.
    Process,
}

impl ContentRenderer {
    /// Select the renderer for an element kind.
    pub fn for_kind(kind: ElementKind, record_limit: usize) -> Self {
        match kind {
            ElementKind::PipeEdge | ElementKind::StoreNode => {
                ContentRenderer::Throughput { record_limit }
            }
            ElementKind::ProcessNode => ContentRenderer::Process,
        }
    }

    /// Render a response. A malformed payload is an error; the poller
    /// swallows it for that tick.
    pub fn render(&self, payload: &Value) -> Result<PopupContent> {
        match self {
            ContentRenderer::Throughput { record_limit } => {
                let sample: ThroughputSample = serde_json::from_value(payload.clone())
                    .context("malformed throughput response")?;
                Ok(PopupContent::Throughput(ThroughputView::from_sample(
                    &sample,
                    *record_limit,
                )))
            }
            ContentRenderer::Process => {
                let records: Vec<Option<ProcessRecord>> =
                    serde_json::from_value(payload.clone())
                        .context("malformed rusage response")?;
                let records: Vec<ProcessRecord> =
                    records.into_iter().map_while(|r| r).collect();
                Ok(PopupContent::Process(records))
            }
        }
    }
}
