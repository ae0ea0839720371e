//! Channel-backed event sink for one WebSocket connection.

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::ports::{PollEventSink, PollEventSinkError};

/// Hands event frames to the connection task without blocking the store.
///
/// Delivery fails once the connection task has dropped its receiver, which
/// unsubscribes the sink on the next broadcast.
#[derive(Debug)]
pub struct ChannelSink {
    tx: UnboundedSender<String>,
}

impl ChannelSink {
    #[must_use]
    pub fn new(tx: UnboundedSender<String>) -> Self {
        Self { tx }
    }
}

impl PollEventSink for ChannelSink {
    fn deliver(&self, message: &str) -> Result<(), PollEventSinkError> {
        self.tx
            .send(message.to_owned())
            .map_err(|_| PollEventSinkError::Closed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use tokio::sync::mpsc;

    #[rstest]
    fn delivers_frames_in_order() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);

        sink.deliver("first").expect("open channel");
        sink.deliver("second").expect("open channel");

        assert_eq!(rx.try_recv().ok().as_deref(), Some("first"));
        assert_eq!(rx.try_recv().ok().as_deref(), Some("second"));
    }

    #[rstest]
    fn reports_closed_once_receiver_is_gone() {
        let (tx, rx) = mpsc::unbounded_channel();
        let sink = ChannelSink::new(tx);
        drop(rx);

        assert_eq!(sink.deliver("frame"), Err(PollEventSinkError::Closed));
    }
}
