//! Fan-out of poll events to registered sinks.
//!
//! The broadcaster is owned by the poll store and only ever touched under the
//! store lock, so it needs no synchronisation of its own. Each event is
//! serialised once and the same frame is handed to every sink. A sink that
//! fails is dropped on the spot; the caller never sees the failure.

use std::sync::Arc;

use tracing::{debug, error};

use crate::domain::PollEvent;
use crate::domain::ports::PollEventSink;

/// Registry of live-update sinks with set semantics.
#[derive(Default)]
pub struct Broadcaster {
    sinks: Vec<Arc<dyn PollEventSink>>,
}

impl Broadcaster {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `sink`. Returns `false` when it was already registered.
    pub fn subscribe(&mut self, sink: Arc<dyn PollEventSink>) -> bool {
        if self.contains(&sink) {
            return false;
        }
        self.sinks.push(sink);
        true
    }

    /// Remove `sink`. Returns `false` when it was not registered.
    pub fn unsubscribe(&mut self, sink: &Arc<dyn PollEventSink>) -> bool {
        let before = self.sinks.len();
        self.sinks.retain(|existing| !Arc::ptr_eq(existing, sink));
        self.sinks.len() != before
    }

    /// Whether `sink` is currently registered.
    #[must_use]
    pub fn contains(&self, sink: &Arc<dyn PollEventSink>) -> bool {
        self.sinks.iter().any(|existing| Arc::ptr_eq(existing, sink))
    }

    /// Number of registered sinks.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    /// Deliver `event` to every sink, pruning the ones that fail.
    pub fn broadcast(&mut self, event: &PollEvent) {
        let message = match event.to_message() {
            Ok(message) => message,
            Err(err) => {
                error!(error = %err, event = event.kind(), "failed to serialise poll event");
                return;
            }
        };

        let before = self.sinks.len();
        self.sinks.retain(|sink| match sink.deliver(&message) {
            Ok(()) => true,
            Err(err) => {
                debug!(error = %err, event = event.kind(), "dropping failed event sink");
                false
            }
        });

        debug!(
            event = event.kind(),
            poll_id = %event.poll_id(),
            delivered = self.sinks.len(),
            pruned = before - self.sinks.len(),
            "poll event broadcast"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PollId;
    use crate::domain::ports::{MockPollEventSink, PollEventSinkError};
    use crate::test_support::RecordingSink;
    use rstest::rstest;

    fn closed_event() -> PollEvent {
        PollEvent::Closed {
            poll_id: PollId::random(),
        }
    }

    #[rstest]
    fn subscribe_has_set_semantics() {
        let mut broadcaster = Broadcaster::new();
        let sink: Arc<dyn PollEventSink> = RecordingSink::shared();

        assert!(broadcaster.subscribe(Arc::clone(&sink)));
        assert!(!broadcaster.subscribe(Arc::clone(&sink)));
        assert_eq!(broadcaster.len(), 1);
    }

    #[rstest]
    fn duplicate_subscription_delivers_once() {
        let mut broadcaster = Broadcaster::new();
        let recorder = RecordingSink::shared();
        let sink: Arc<dyn PollEventSink> = recorder.clone();
        broadcaster.subscribe(Arc::clone(&sink));
        broadcaster.subscribe(sink);

        broadcaster.broadcast(&closed_event());

        assert_eq!(recorder.frames().len(), 1);
    }

    #[rstest]
    fn unsubscribe_ignores_unknown_sinks() {
        let mut broadcaster = Broadcaster::new();
        let registered: Arc<dyn PollEventSink> = RecordingSink::shared();
        let stranger: Arc<dyn PollEventSink> = RecordingSink::shared();
        broadcaster.subscribe(Arc::clone(&registered));

        assert!(!broadcaster.unsubscribe(&stranger));
        assert!(broadcaster.unsubscribe(&registered));
        assert!(broadcaster.is_empty());
    }

    #[rstest]
    fn every_sink_receives_the_same_frame() {
        let mut broadcaster = Broadcaster::new();
        let first = RecordingSink::shared();
        let second = RecordingSink::shared();
        broadcaster.subscribe(first.clone());
        broadcaster.subscribe(second.clone());

        let event = closed_event();
        broadcaster.broadcast(&event);

        let expected = event.to_message().expect("serialise event");
        assert_eq!(first.frames(), vec![expected.clone()]);
        assert_eq!(second.frames(), vec![expected]);
    }

    #[rstest]
    #[case(PollEventSinkError::Closed)]
    #[case(PollEventSinkError::rejected("socket full"))]
    fn failing_sink_is_pruned_without_affecting_others(#[case] failure: PollEventSinkError) {
        let mut broadcaster = Broadcaster::new();
        let before = RecordingSink::shared();
        let after = RecordingSink::shared();
        let mut failing = MockPollEventSink::new();
        failing
            .expect_deliver()
            .times(1)
            .returning(move |_| Err(failure.clone()));
        let failing: Arc<dyn PollEventSink> = Arc::new(failing);

        broadcaster.subscribe(before.clone());
        broadcaster.subscribe(Arc::clone(&failing));
        broadcaster.subscribe(after.clone());

        broadcaster.broadcast(&closed_event());
        assert!(!broadcaster.contains(&failing));
        assert_eq!(broadcaster.len(), 2);

        broadcaster.broadcast(&closed_event());
        assert_eq!(before.frames().len(), 2);
        assert_eq!(after.frames().len(), 2);
    }

    #[rstest]
    fn broadcast_without_sinks_is_a_no_op() {
        let mut broadcaster = Broadcaster::new();
        broadcaster.broadcast(&closed_event());
        assert!(broadcaster.is_empty());
    }
}
