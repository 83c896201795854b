//! Alert feed synchronization engine.
//!
//! Reconciles three data sources into one bounded, newest-first,
//! pausable view of recent alerts:
//!
//! - a WebSocket push channel delivering alerts as they are created,
//! - an on-demand snapshot fetch over HTTP,
//! - a timed fallback poll that runs only while the push channel is
//!   unhealthy.
//!
//! The [`FeedSynchronizer`] owns all feed state and is the only
//! component that mutates it. [`ChannelSession`] and
//! [`FallbackPoller`] are stateless with respect to alert data; they
//! run in background tasks and report epoch-stamped [`FeedEvent`]s
//! over a channel, which the synchronizer folds one at a time.
//!
//! There is no fatal error path here: a broken fetch or a garbled
//! push frame is dropped and the feed keeps rendering whatever state
//! it already has. The only externally observable failure signal is
//! [`ChannelStatus`] reaching `Closed`/`Errored`, which the UI uses
//! to explain degraded (polling) mode.

pub mod event;
pub mod poller;
pub mod session;
pub mod state;
pub mod synchronizer;

pub use event::{ChannelStatus, EpochEvent, FeedEvent};
pub use poller::FallbackPoller;
pub use session::ChannelSession;
pub use state::FeedState;
pub use synchronizer::FeedSynchronizer;
