// ── Live-result polling ──
//
// One poller per Active poll: a single self-rescheduling tokio task
// that fetches results on a fixed interval, normalizes whatever shape
// the service answers with, and publishes the aggregate through a
// `watch` channel. Ticks never overlap -- the loop awaits each tick
// body before scheduling the next.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use quickpoll_api::PollClient;

use crate::aggregate::{DisplayOrder, aggregate};
use crate::model::{PollResults, ResultsSnapshot};

/// Handle to the background refresh task for one poll.
///
/// Owned by the lifecycle controller while the poll is Active.
/// Dropping the handle cancels the task; an in-flight fetch at
/// cancellation time completes but its result is discarded.
#[derive(Debug)]
pub struct ResultsPoller {
    cancel: CancellationToken,
    results: watch::Receiver<Option<PollResults>>,
    ticks: Arc<AtomicU64>,
    // Option so shutdown() can take the handle out from under Drop.
    handle: Option<JoinHandle<()>>,
}

impl ResultsPoller {
    /// Spawn the refresh loop for `code`, ticking every `interval`.
    pub(crate) fn spawn(client: Arc<PollClient>, code: String, interval: Duration) -> Self {
        let cancel = CancellationToken::new();
        let ticks = Arc::new(AtomicU64::new(0));
        let (tx, rx) = watch::channel(None);

        let handle = tokio::spawn(refresh_task(
            client,
            code,
            interval,
            cancel.clone(),
            tx,
            Arc::clone(&ticks),
        ));

        Self {
            cancel,
            results: rx,
            ticks,
            handle: Some(handle),
        }
    }

    /// Subscribe to aggregated results. Holds `None` until the first
    /// successful fetch.
    pub fn subscribe(&self) -> watch::Receiver<Option<PollResults>> {
        self.results.clone()
    }

    /// The most recently published aggregate, if any tick has succeeded.
    pub fn latest(&self) -> Option<PollResults> {
        self.results.borrow().clone()
    }

    /// Number of fetch attempts so far (successful or not).
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Request the loop to stop. No further ticks are scheduled after
    /// this returns; a tick already in flight discards its result.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Stop and wait for the task to finish. After this resolves, no
    /// further result fetch will be issued for this poll.
    pub async fn shutdown(mut self) {
        self.cancel.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for ResultsPoller {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

/// The refresh loop. A failed tick is logged and the loop keeps
/// ticking -- only cancellation stops it.
async fn refresh_task(
    client: Arc<PollClient>,
    code: String,
    interval: Duration,
    cancel: CancellationToken,
    tx: watch::Sender<Option<PollResults>>,
    ticks: Arc<AtomicU64>,
) {
    let mut interval = tokio::time::interval(interval);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut order = DisplayOrder::new();

    loop {
        tokio::select! {
            biased;
            _ = cancel.cancelled() => break,
            _ = interval.tick() => {}
        }

        ticks.fetch_add(1, Ordering::Relaxed);

        match client.results(&code).await {
            Ok(payload) => {
                // Cancelled mid-fetch: the poll is closed or the view is
                // gone -- this result must not be published.
                if cancel.is_cancelled() {
                    break;
                }
                let snapshot = order.arrange(ResultsSnapshot::from(payload));
                let results = aggregate(&snapshot);
                debug!(code = %code, total = results.total_votes, "results refreshed");
                let _ = tx.send(Some(results));
            }
            Err(e) => {
                if cancel.is_cancelled() {
                    break;
                }
                warn!(code = %code, error = %e, "results refresh failed");
            }
        }
    }

    debug!(code = %code, "results poller stopped");
}
