//! Network-activity indicator.
//!
//! A reference count over every in-flight HTTP request in the system,
//! not tied to any single poller. The header bar shows a spinner while
//! the count is non-zero.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Shared in-flight request counter.
#[derive(Debug, Clone, Default)]
pub struct BusyGauge {
    inflight: Arc<AtomicUsize>,
}

impl BusyGauge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a request as started; the returned guard marks it finished
    /// when dropped, on success and failure alike.
    pub fn track(&self) -> BusyGuard {
        self.inflight.fetch_add(1, Ordering::SeqCst);
        BusyGuard {
            inflight: self.inflight.clone(),
        }
    }

    /// Whether any request is currently outstanding.
    pub fn is_busy(&self) -> bool {
        self.inflight.load(Ordering::SeqCst) > 0
    }
}

/// RAII guard for one in-flight request.
#[derive(Debug)]
pub struct BusyGuard {
    inflight: Arc<AtomicUsize>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.inflight.fetch_sub(1, Ordering::SeqCst);
    }
}
