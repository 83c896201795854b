//! Feed state: the bounded, newest-first alert list and its flags.

use std::collections::VecDeque;

use idsfeed_client::AlertRecord;

use crate::event::ChannelStatus;

/// The synchronizer's view of the feed.
///
/// `alerts` is kept newest-first and never longer than `limit`. Both
/// delivery paths can legitimately produce near-duplicate ids across
/// reconnect/poll boundaries; no dedup happens here, only positional
/// bounding.
#[derive(Debug, Clone)]
pub struct FeedState {
    alerts: VecDeque<AlertRecord>,
    channel_status: ChannelStatus,
    limit: usize,
    paused: bool,
}

impl FeedState {
    /// Fresh state for a new synchronizer epoch: empty, unpaused,
    /// channel connecting.
    pub fn new(limit: usize) -> Self {
        Self {
            alerts: VecDeque::new(),
            channel_status: ChannelStatus::Connecting,
            limit,
            paused: false,
        }
    }

    /// The alerts, newest-first.
    pub fn alerts(&self) -> &VecDeque<AlertRecord> {
        &self.alerts
    }

    pub fn channel_status(&self) -> ChannelStatus {
        self.channel_status
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn len(&self) -> usize {
        self.alerts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.alerts.is_empty()
    }

    pub(crate) fn set_channel_status(&mut self, status: ChannelStatus) {
        self.channel_status = status;
    }

    pub(crate) fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Replace the whole list with a snapshot delivered oldest-first.
    /// Stored newest-first and bounded to `limit`.
    pub(crate) fn replace_all(&mut self, records: Vec<AlertRecord>) {
        self.alerts = records.into_iter().rev().collect();
        self.alerts.truncate(self.limit);
    }

    /// Prepend one pushed alert and evict past the limit.
    pub(crate) fn prepend(&mut self, record: AlertRecord) {
        self.alerts.push_front(record);
        self.alerts.truncate(self.limit);
    }

    /// Empty the list. Status, limit, and pause flag are untouched.
    pub(crate) fn clear(&mut self) {
        self.alerts.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn alert(id: i64) -> AlertRecord {
        AlertRecord {
            id,
            ts: None,
            kind: "PORT_SCAN".to_string(),
            src: None,
            details: None,
        }
    }

    #[test]
    fn test_new_state_is_connecting_and_empty() {
        let state = FeedState::new(200);
        assert!(state.is_empty());
        assert!(!state.is_paused());
        assert_eq!(state.channel_status(), ChannelStatus::Connecting);
        assert_eq!(state.limit(), 200);
    }

    #[test]
    fn test_replace_all_reverses_to_newest_first() {
        let mut state = FeedState::new(3);
        state.replace_all(vec![alert(1), alert(2), alert(3)]);
        let ids: Vec<i64> = state.alerts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_replace_all_bounds_to_limit() {
        let mut state = FeedState::new(2);
        state.replace_all(vec![alert(1), alert(2), alert(3), alert(4)]);
        let ids: Vec<i64> = state.alerts().iter().map(|a| a.id).collect();
        // Newest two survive.
        assert_eq!(ids, vec![4, 3]);
    }

    #[test]
    fn test_prepend_evicts_oldest() {
        let mut state = FeedState::new(3);
        state.replace_all(vec![alert(1), alert(2), alert(3)]);
        state.prepend(alert(4));
        let ids: Vec<i64> = state.alerts().iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![4, 3, 2]);
    }

    #[test]
    fn test_duplicate_ids_are_kept() {
        let mut state = FeedState::new(5);
        state.prepend(alert(1));
        state.prepend(alert(1));
        assert_eq!(state.len(), 2);
    }

    #[test]
    fn test_clear_keeps_flags() {
        let mut state = FeedState::new(3);
        state.set_paused(true);
        state.prepend(alert(1));
        state.clear();
        assert!(state.is_empty());
        assert!(state.is_paused());
        assert_eq!(state.limit(), 3);
    }

    proptest! {
        /// For any sequence of pushes, the list never exceeds the
        /// limit and stays newest-first (later pushes in front).
        #[test]
        fn prop_prepend_is_bounded_and_ordered(
            ids in proptest::collection::vec(0i64..10_000, 0..300),
            limit in 1usize..50,
        ) {
            let mut state = FeedState::new(limit);
            for &id in &ids {
                state.prepend(alert(id));
            }
            prop_assert!(state.len() <= limit);
            let expected: Vec<i64> =
                ids.iter().rev().take(limit).copied().collect();
            let actual: Vec<i64> =
                state.alerts().iter().map(|a| a.id).collect();
            prop_assert_eq!(actual, expected);
        }
    }
}
