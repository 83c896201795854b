//! Typed events flowing from the data sources into the synchronizer.

use idsfeed_client::AlertRecord;

/// Health of the push channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelStatus {
    /// Handshake in progress.
    Connecting,
    /// Channel established; push delivery is authoritative.
    Open,
    /// Channel gone; fallback polling takes over.
    Closed,
    /// Transport error observed. Always followed by `Closed`; never a
    /// terminal state on its own.
    Errored,
}

impl ChannelStatus {
    /// Lowercase label for status display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Connecting => "connecting",
            Self::Open => "open",
            Self::Closed => "closed",
            Self::Errored => "error",
        }
    }
}

/// One event produced by a channel session, the fallback poller, or
/// an initial snapshot fetch.
#[derive(Debug, Clone, PartialEq)]
pub enum FeedEvent {
    /// The push channel changed health.
    HealthChanged(ChannelStatus),
    /// One alert arrived over the push channel.
    AlertReceived(AlertRecord),
    /// A fallback poll returned the full recent window, oldest-first.
    SnapshotReceived(Vec<AlertRecord>),
    /// The initial population fetch returned, oldest-first. Applied
    /// even while paused; initial population is not pausable.
    InitialSnapshot(Vec<AlertRecord>),
}

/// Envelope stamping each event with the synchronizer epoch its
/// source was spawned under. Events whose epoch no longer matches the
/// synchronizer's current epoch are discarded unconditionally, so a
/// source that was torn down can never mutate state after its owner
/// has moved on.
#[derive(Debug, Clone, PartialEq)]
pub struct EpochEvent {
    pub epoch: u64,
    pub event: FeedEvent,
}

impl EpochEvent {
    pub fn new(epoch: u64, event: FeedEvent) -> Self {
        Self { epoch, event }
    }
}
