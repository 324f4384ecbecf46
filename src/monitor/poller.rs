//! The repeating fetch-and-render loop behind one hover session.
//!
//! A poller is a tokio task bound to a single URL. It fetches on a
//! fixed cadence (first tick immediately, so the popup fills within
//! one tick of pointer-enter) and pushes rendered content tagged with
//! its session generation. A failed or malformed fetch is skipped for
//! that tick; the cadence continues and the popup keeps its last good
//! values.

use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::debug;
use url::Url;

use super::endpoint::ContentRenderer;
use super::fetch::Fetcher;
use super::MonitorUpdate;

/// Spawn a poll task for one session.
///
/// The element id and generation are captured by value; the task
/// identifies itself with them on every update it pushes. Stopping is
/// the caller's job: abort the returned handle and let the generation
/// gate discard anything already in flight.
#[allow(clippy::too_many_arguments)]
pub fn spawn(
    runtime: &Handle,
    fetcher: Arc<dyn Fetcher>,
    url: Url,
    cadence: Duration,
    renderer: ContentRenderer,
    element_id: String,
    generation: u64,
    updates: mpsc::UnboundedSender<MonitorUpdate>,
) -> JoinHandle<()> {
    runtime.spawn(async move {
        let mut ticker = tokio::time::interval(cadence);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            let payload = match fetcher.get_json(&url).await {
                Ok(payload) => payload,
                Err(e) => {
                    debug!(url = %url, error = %e, "metric fetch failed, will retry next tick");
                    continue;
                }
            };

            let content = match renderer.render(&payload) {
                Ok(content) => content,
                Err(e) => {
                    debug!(url = %url, error = %e, "malformed metric response, skipping tick");
                    continue;
                }
            };

            let update = MonitorUpdate::Metric {
                element_id: element_id.clone(),
                generation,
                content,
            };
            if updates.send(update).is_err() {
                // Main loop is gone, nothing left to render into.
                break;
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagram::ElementKind;
    use crate::monitor::fetch::testing::FakeFetcher;
    use crate::popup::PopupContent;
    use serde_json::json;

    const URL: &str = "http://localhost:8080/mon-p3";

    fn throughput_payload() -> serde_json::Value {
        json!({ "nbytes": 1000, "nlines": 10, "rtime": 2.0, "data": "tail" })
    }

    #[tokio::test(start_paused = true)]
    async fn test_first_fetch_within_one_tick() {
        let fetcher = FakeFetcher::new();
        fetcher.respond(URL, throughput_payload());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn(
            &Handle::current(),
            fetcher.clone(),
            Url::parse(URL).unwrap(),
            Duration::from_millis(500),
            ContentRenderer::for_kind(ElementKind::PipeEdge, 500),
            "p3".to_string(),
            1,
            tx,
        );

        let update = rx.recv().await.unwrap();
        let MonitorUpdate::Metric {
            element_id,
            generation,
            content,
        } = update
        else {
            panic!("expected metric update");
        };
        assert_eq!(element_id, "p3");
        assert_eq!(generation, 1);
        assert!(matches!(content, PopupContent::Throughput(_)));
        assert_eq!(fetcher.request_count(URL), 1);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_polls_on_cadence() {
        let fetcher = FakeFetcher::new();
        fetcher.respond(URL, throughput_payload());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn(
            &Handle::current(),
            fetcher.clone(),
            Url::parse(URL).unwrap(),
            Duration::from_millis(500),
            ContentRenderer::for_kind(ElementKind::PipeEdge, 500),
            "p3".to_string(),
            1,
            tx,
        );

        for _ in 0..3 {
            assert!(rx.recv().await.is_some());
        }
        assert_eq!(fetcher.request_count(URL), 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_fetch_failure_keeps_cadence() {
        // No canned response: every fetch fails, but the loop keeps
        // ticking and never pushes an update.
        let fetcher = FakeFetcher::new();
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn(
            &Handle::current(),
            fetcher.clone(),
            Url::parse(URL).unwrap(),
            Duration::from_millis(500),
            ContentRenderer::for_kind(ElementKind::PipeEdge, 500),
            "p3".to_string(),
            1,
            tx,
        );

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert!(rx.try_recv().is_err());
        assert!(fetcher.request_count(URL) >= 3);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_malformed_response_skipped() {
        let fetcher = FakeFetcher::new();
        fetcher.respond(URL, json!({ "nbytes": "garbage" }));
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn(
            &Handle::current(),
            fetcher.clone(),
            Url::parse(URL).unwrap(),
            Duration::from_millis(500),
            ContentRenderer::for_kind(ElementKind::PipeEdge, 500),
            "p3".to_string(),
            1,
            tx,
        );

        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(rx.try_recv().is_err());
        assert!(fetcher.request_count(URL) >= 2);

        handle.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn test_abort_stops_requests() {
        let fetcher = FakeFetcher::new();
        fetcher.respond(URL, throughput_payload());
        let (tx, mut rx) = mpsc::unbounded_channel();

        let handle = spawn(
            &Handle::current(),
            fetcher.clone(),
            Url::parse(URL).unwrap(),
            Duration::from_millis(500),
            ContentRenderer::for_kind(ElementKind::PipeEdge, 500),
            "p3".to_string(),
            1,
            tx,
        );

        assert!(rx.recv().await.is_some());
        handle.abort();
        let requests_at_abort = fetcher.request_count(URL);

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(fetcher.request_count(URL), requests_at_abort);
    }
}
