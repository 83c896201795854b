//! Channel session: one WebSocket connection's lifecycle.
//!
//! Owns exactly one logical push-channel connection. All data leaves
//! through the event channel; the session never touches feed state.
//! States follow `Connecting -> Open -> Closed`, with `Errored`
//! reachable from `Connecting` or `Open` and always followed by
//! `Closed`.

use futures_util::{SinkExt, StreamExt};
use tokio::sync::mpsc;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};
use url::Url;

use idsfeed_client::AlertRecord;

use crate::event::{ChannelStatus, EpochEvent, FeedEvent};

/// Handle to a running channel session task.
///
/// Dropping the handle does not stop the task; owners call [`stop`]
/// first, which is also what suppresses any further events from this
/// instance.
///
/// [`stop`]: ChannelSession::stop
#[derive(Debug)]
pub struct ChannelSession {
    cancel: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl ChannelSession {
    /// Connect to `ws_url` and start receiving in a background task.
    ///
    /// Events are stamped with `epoch` so the owner can discard
    /// stragglers from an abandoned session instance.
    pub fn spawn(ws_url: Url, epoch: u64, events: mpsc::Sender<EpochEvent>) -> Self {
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(ws_url, epoch, events, cancel.clone()));
        Self { cancel, handle }
    }

    /// Tear down the session: closes the underlying connection if
    /// open and suppresses any further events from this instance.
    /// Idempotent.
    pub fn stop(&self) {
        self.cancel.cancel();
    }

    /// Whether the session task has exited.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

async fn run(
    ws_url: Url,
    epoch: u64,
    events: mpsc::Sender<EpochEvent>,
    cancel: CancellationToken,
) {
    info!(url = %ws_url, epoch, "Connecting to push channel");

    let stream = tokio::select! {
        _ = cancel.cancelled() => return,
        result = connect_async(ws_url.as_str()) => match result {
            Ok((stream, _response)) => stream,
            Err(e) => {
                warn!(error = %e, "Push channel handshake failed");
                emit(&events, &cancel, epoch, FeedEvent::HealthChanged(ChannelStatus::Errored)).await;
                emit(&events, &cancel, epoch, FeedEvent::HealthChanged(ChannelStatus::Closed)).await;
                return;
            }
        },
    };

    info!(epoch, "Push channel open");
    emit(
        &events,
        &cancel,
        epoch,
        FeedEvent::HealthChanged(ChannelStatus::Open),
    )
    .await;

    let (mut write, mut read) = stream.split();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                let _ = write.close().await;
                return;
            }
            message = read.next() => match message {
                Some(Ok(Message::Text(text))) => {
                    match serde_json::from_str::<AlertRecord>(&text) {
                        Ok(record) => {
                            if !emit(&events, &cancel, epoch, FeedEvent::AlertReceived(record)).await {
                                return;
                            }
                        }
                        // Best-effort delivery: a garbled frame is
                        // dropped without killing the session.
                        Err(e) => debug!(error = %e, "Discarding malformed push message"),
                    }
                }
                Some(Ok(Message::Close(_))) | None => {
                    info!(epoch, "Push channel closed by server");
                    emit(&events, &cancel, epoch, FeedEvent::HealthChanged(ChannelStatus::Closed)).await;
                    return;
                }
                Some(Ok(_)) => {
                    // Binary and control frames carry no alerts.
                }
                Some(Err(e)) => {
                    warn!(error = %e, epoch, "Push channel transport error");
                    emit(&events, &cancel, epoch, FeedEvent::HealthChanged(ChannelStatus::Errored)).await;
                    emit(&events, &cancel, epoch, FeedEvent::HealthChanged(ChannelStatus::Closed)).await;
                    return;
                }
            }
        }
    }
}

/// Send an event unless this session was stopped. Returns false when
/// the session should wind down (stopped, or receiver gone).
async fn emit(
    events: &mpsc::Sender<EpochEvent>,
    cancel: &CancellationToken,
    epoch: u64,
    event: FeedEvent,
) -> bool {
    if cancel.is_cancelled() {
        return false;
    }
    events.send(EpochEvent::new(epoch, event)).await.is_ok()
}
