//! Feed synchronizer: the orchestration core.
//!
//! Composes the channel session, the fallback poller, and the
//! snapshot fetcher into one coherent feed. Decides which source is
//! authoritative at any moment, folds all source events into the
//! bounded alert list through a single mutation point, and
//! reconfigures cleanly when the display limit changes.
//!
//! # Invariants
//! - `FeedState` is mutated only inside [`FeedSynchronizer::apply`].
//! - A discarded session/poller is stopped BEFORE any replacement is
//!   created, and the epoch bump makes its in-flight events inert.
//! - Push and poll are never both active: `HealthChanged(Open)` stops
//!   the poller within the same synchronous fold step.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info, trace, warn};
use url::Url;

use idsfeed_client::AlertsClient;
use idsfeed_config::FeedSettings;

use crate::event::{ChannelStatus, EpochEvent, FeedEvent};
use crate::poller::FallbackPoller;
use crate::session::ChannelSession;
use crate::state::FeedState;

/// Bound on source events waiting to be folded.
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Orchestrator for one alert feed.
///
/// External callers (the UI layer) only ever talk to this type. Call
/// [`initialize`] once, then drive [`tick`] from the event loop and
/// invoke the control operations as the user asks for them.
///
/// [`initialize`]: FeedSynchronizer::initialize
/// [`tick`]: FeedSynchronizer::tick
#[derive(Debug)]
pub struct FeedSynchronizer {
    client: Arc<AlertsClient>,
    ws_url: Url,
    poll_interval: Duration,
    state: FeedState,
    epoch: u64,
    session: Option<ChannelSession>,
    poller: Option<FallbackPoller>,
    events_tx: mpsc::Sender<EpochEvent>,
    events_rx: mpsc::Receiver<EpochEvent>,
    shutting_down: bool,
}

impl FeedSynchronizer {
    /// Create an idle synchronizer. No sources run until
    /// [`initialize`](Self::initialize) is called.
    pub fn new(client: Arc<AlertsClient>, settings: &FeedSettings) -> Self {
        let (events_tx, events_rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            client,
            ws_url: settings.ws_url(),
            poll_interval: settings.poll_interval(),
            state: FeedState::new(idsfeed_config::constants::DEFAULT_HISTORY_LIMIT),
            epoch: 0,
            session: None,
            poller: None,
            events_tx,
            events_rx,
            shutting_down: false,
        }
    }

    /// Override the fallback poll interval.
    pub fn with_poll_interval(mut self, interval: Duration) -> Self {
        self.poll_interval = interval;
        self
    }

    /// Override the push channel URL, for deployments where the
    /// channel is not served from the snapshot endpoint's origin.
    pub fn with_ws_url(mut self, ws_url: Url) -> Self {
        self.ws_url = ws_url;
        self
    }

    // ------------------------------------------------------------------
    // Public contract
    // ------------------------------------------------------------------

    /// Reset state, issue one snapshot fetch for initial population,
    /// and start a channel session.
    ///
    /// The initial snapshot replaces the list when it lands even if
    /// the feed was paused in the meantime; initial population is not
    /// pausable.
    pub fn initialize(&mut self, limit: usize) {
        info!(limit, "Initializing alert feed");
        self.teardown_sources();
        self.epoch += 1;
        self.shutting_down = false;
        self.state = FeedState::new(limit);
        self.spawn_initial_snapshot();
        self.session = Some(ChannelSession::spawn(
            self.ws_url.clone(),
            self.epoch,
            self.events_tx.clone(),
        ));
    }

    /// Change the display limit. A hard restart, not an incremental
    /// resize: the subscription and the display window are coupled to
    /// the limit by construction.
    pub fn set_limit(&mut self, new_limit: usize) {
        info!(new_limit, "Changing history limit, restarting feed");
        self.initialize(new_limit);
    }

    /// Freeze the visible projection. Sources keep running; events
    /// arriving while paused are dropped, not buffered.
    pub fn pause(&mut self) {
        self.state.set_paused(true);
    }

    /// Unfreeze the visible projection. Only events arriving from now
    /// on affect the list.
    pub fn resume(&mut self) {
        self.state.set_paused(false);
    }

    /// On-demand snapshot fetch. On success the list is replaced
    /// (newest-first) even while paused; a manual refresh is an
    /// explicit user override. On failure state is left unchanged.
    pub async fn refresh_now(&mut self) {
        match self.client.snapshot(self.state.limit()).await {
            Ok(records) => {
                debug!(count = records.len(), "Manual refresh applied");
                self.state.replace_all(records);
            }
            Err(e) => debug!(error = %e, "Manual refresh failed, keeping current view"),
        }
    }

    /// Empty the local list. No network effect.
    pub fn clear_local(&mut self) {
        self.state.clear();
    }

    /// Purge server-side storage, then clear the local list whether
    /// or not the purge succeeded. The local view must not retain
    /// stale data just because the server call errored.
    pub async fn clear_server(&mut self) {
        if let Err(e) = self.client.purge().await {
            warn!(error = %e, "Purge request failed, clearing local view anyway");
        }
        self.clear_local();
    }

    /// Stop both sources and invalidate in-flight events. A late
    /// close notification from a stopped session cannot revive the
    /// poller afterwards.
    pub fn shutdown(&mut self) {
        info!("Shutting down alert feed");
        self.shutting_down = true;
        self.teardown_sources();
        self.epoch += 1;
    }

    /// Receive one source event and fold it into state. The event
    /// loop primitive: pends until a source produces something.
    pub async fn tick(&mut self) {
        if let Some(event) = self.events_rx.recv().await {
            self.apply(event);
        }
    }

    /// Fold one event into state. The single mutation point; each
    /// event is self-contained and assumes nothing about prior
    /// events.
    pub fn apply(&mut self, event: EpochEvent) {
        if event.epoch != self.epoch {
            trace!(
                stale = event.epoch,
                current = self.epoch,
                "Discarding event from abandoned source"
            );
            return;
        }

        match event.event {
            FeedEvent::HealthChanged(ChannelStatus::Open) => {
                info!("Push channel authoritative, stopping fallback poll");
                self.state.set_channel_status(ChannelStatus::Open);
                self.stop_poller();
            }
            FeedEvent::HealthChanged(ChannelStatus::Closed) => {
                self.state.set_channel_status(ChannelStatus::Closed);
                if self.shutting_down {
                    debug!("Channel closed during shutdown, not starting fallback poll");
                } else {
                    self.start_poller();
                }
            }
            FeedEvent::HealthChanged(status) => {
                self.state.set_channel_status(status);
            }
            FeedEvent::AlertReceived(record) => {
                if self.state.is_paused() {
                    trace!(id = record.id, "Paused, dropping pushed alert");
                } else {
                    self.state.prepend(record);
                }
            }
            FeedEvent::SnapshotReceived(records) => {
                if self.state.is_paused() {
                    trace!("Paused, dropping poll result");
                } else {
                    self.state.replace_all(records);
                }
            }
            FeedEvent::InitialSnapshot(records) => {
                debug!(count = records.len(), "Initial population applied");
                self.state.replace_all(records);
            }
        }
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// The current feed state (alerts newest-first, status, flags).
    pub fn state(&self) -> &FeedState {
        &self.state
    }

    /// Whether the fallback poller is currently active.
    pub fn poller_active(&self) -> bool {
        self.poller.is_some()
    }

    /// Whether a channel session instance currently exists.
    pub fn session_active(&self) -> bool {
        self.session.is_some()
    }

    /// A sender for injecting events, stamped however the caller
    /// chooses. Exists for source tasks and tests; UI code has no use
    /// for it.
    pub fn events_sender(&self) -> mpsc::Sender<EpochEvent> {
        self.events_tx.clone()
    }

    /// The epoch current source instances are stamped with.
    pub fn epoch(&self) -> u64 {
        self.epoch
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn spawn_initial_snapshot(&self) {
        let client = Arc::clone(&self.client);
        let events = self.events_tx.clone();
        let epoch = self.epoch;
        let limit = self.state.limit();
        tokio::spawn(async move {
            match client.snapshot(limit).await {
                Ok(records) => {
                    let _ = events
                        .send(EpochEvent::new(epoch, FeedEvent::InitialSnapshot(records)))
                        .await;
                }
                Err(e) => debug!(error = %e, "Initial snapshot failed, feed starts empty"),
            }
        });
    }

    fn start_poller(&mut self) {
        if self.poller.is_some() {
            return;
        }
        self.poller = Some(FallbackPoller::spawn(
            Arc::clone(&self.client),
            self.state.limit(),
            self.poll_interval,
            self.epoch,
            self.events_tx.clone(),
        ));
    }

    fn stop_poller(&mut self) {
        if let Some(poller) = self.poller.take() {
            poller.stop();
        }
    }

    /// Stop the current session and poller, in that order, before any
    /// replacement exists.
    fn teardown_sources(&mut self) {
        if let Some(session) = self.session.take() {
            session.stop();
        }
        self.stop_poller();
    }
}
