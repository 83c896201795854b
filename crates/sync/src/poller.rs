//! Fallback poller: timed snapshot fetches while the push channel is
//! down.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use idsfeed_client::AlertsClient;

use crate::event::{EpochEvent, FeedEvent};

/// Handle to a running fallback poll task.
///
/// While active, fetches a snapshot every `interval` and emits each
/// successful result as [`FeedEvent::SnapshotReceived`]. Failed
/// fetches are swallowed; a transient failure must not disturb the
/// next scheduled attempt. The first fetch happens one full interval
/// after activation, never immediately.
#[derive(Debug)]
pub struct FallbackPoller {
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl FallbackPoller {
    /// Start the recurring poll. One timer per instance by
    /// construction; owners stop an old poller before spawning a
    /// replacement.
    pub fn spawn(
        client: Arc<AlertsClient>,
        limit: usize,
        interval: Duration,
        epoch: u64,
        events: mpsc::Sender<EpochEvent>,
    ) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(client, limit, interval, epoch, events, cancel.clone()));
        Self { cancel, handle }
    }

    /// Cancel the recurring poll. Idempotent; stopping a poller that
    /// already wound down is a no-op.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the poll task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run(
    client: Arc<AlertsClient>,
    limit: usize,
    interval: Duration,
    epoch: u64,
    events: mpsc::Sender<EpochEvent>,
    cancel: CancellationToken,
) {
    info!(limit, interval_ms = interval.as_millis() as u64, epoch, "Fallback polling active");

    let mut ticker = time::interval_at(Instant::now() + interval, interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!(epoch, "Fallback polling stopped");
                return;
            }
            _ = ticker.tick() => {
                match client.snapshot(limit).await {
                    Ok(records) => {
                        if cancel.is_cancelled() {
                            return;
                        }
                        let event = EpochEvent::new(epoch, FeedEvent::SnapshotReceived(records));
                        if events.send(event).await.is_err() {
                            return;
                        }
                    }
                    Err(e) => debug!(error = %e, "Fallback poll failed, retrying next tick"),
                }
            }
        }
    }
}
