//! Process identity resolution.
//!
//! The metrics endpoint addresses processes by operating-system pid,
//! not by graph node id. The cache maps node ids to pids, populated
//! asynchronously; lookups are prefetched at classification time so
//! the pid is already known by the time the operator hovers. At most one
//! lookup request is ever issued per node id; a failed lookup is
//! logged and never retried.

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::monitor::endpoint::Endpoints;
use crate::monitor::fetch::Fetcher;
use crate::monitor::MonitorUpdate;

/// Resolution state for one node id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PidState {
    /// A lookup has been issued; the result has not arrived.
    Pending,
    /// The pid is known. Write-once: never overwritten.
    Resolved(i32),
}

/// Wire format of the identity endpoint.
#[derive(Debug, Deserialize)]
struct PidResponse {
    pid: i32,
}

/// Node-id → pid cache with single-flight population.
#[derive(Debug, Default)]
pub struct PidCache {
    entries: HashMap<String, PidState>,
}

impl PidCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Issue lookups for every id not yet known to the cache.
    ///
    /// Ids that already have an entry (pending or resolved) are
    /// skipped, so the classification-time prefetch and any later call
    /// coalesce into at most one outstanding request per id. Results
    /// arrive as [`MonitorUpdate::Identity`] on the update channel.
    pub fn prefetch(
        &mut self,
        ids: &[String],
        endpoints: &Endpoints,
        fetcher: Arc<dyn Fetcher>,
        runtime: &Handle,
        updates: mpsc::UnboundedSender<MonitorUpdate>,
    ) {
        for id in ids {
            let Entry::Vacant(entry) = self.entries.entry(id.clone()) else {
                continue;
            };
            entry.insert(PidState::Pending);

            let url = match endpoints.pid_url(id) {
                Ok(url) => url,
                Err(e) => {
                    warn!(id = %id, error = %e, "cannot derive identity URL");
                    continue;
                }
            };

            debug!(id = %id, "requesting process identity");
            // The id is moved into the task by value.
            let node_id = id.clone();
            let fetcher = fetcher.clone();
            let updates = updates.clone();
            runtime.spawn(async move {
                match fetch_pid(fetcher.as_ref(), &url).await {
                    Ok(pid) => {
                        debug!(id = %node_id, pid, "process identity resolved");
                        let _ = updates.send(MonitorUpdate::Identity { node_id, pid });
                    }
                    Err(e) => {
                        warn!(id = %node_id, error = %e, "identity lookup failed");
                    }
                }
            });
        }
    }

    /// Record a resolved pid. Write-once: an already-resolved entry is
    /// left untouched.
    pub fn complete(&mut self, id: &str, pid: i32) {
        match self.entries.get(id) {
            Some(PidState::Resolved(_)) => {}
            _ => {
                self.entries.insert(id.to_string(), PidState::Resolved(pid));
            }
        }
    }

    /// The resolved pid for a node, if known.
    pub fn pid_of(&self, id: &str) -> Option<i32> {
        match self.entries.get(id) {
            Some(PidState::Resolved(pid)) => Some(*pid),
            _ => None,
        }
    }

    /// The resolution state for a node, if a lookup was ever issued.
    pub fn state_of(&self, id: &str) -> Option<PidState> {
        self.entries.get(id).copied()
    }
}

async fn fetch_pid(fetcher: &dyn Fetcher, url: &url::Url) -> anyhow::Result<i32> {
    let payload = fetcher.get_json(url).await?;
    let response: PidResponse = serde_json::from_value(payload)?;
    Ok(response.pid)
}
