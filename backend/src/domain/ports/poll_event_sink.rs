//! Driven port for live-update delivery.
//!
//! A sink is anything that can take one serialised event frame. The fan-out
//! depends only on this capability; transports wrap their connection handle
//! in an implementation and register it with the store.

use thiserror::Error;

/// Reasons a sink refused a message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollEventSinkError {
    /// The receiving side has gone away.
    #[error("event sink is closed")]
    Closed,
    /// The sink is alive but could not accept the frame.
    #[error("event sink rejected the message: {message}")]
    Rejected { message: String },
}

impl PollEventSinkError {
    /// Convenience constructor for [`PollEventSinkError::Rejected`].
    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }
}

/// Destination for serialised poll events.
///
/// `deliver` must not block: the fan-out calls it while holding the store
/// lock. Returning an error unsubscribes the sink.
#[cfg_attr(test, mockall::automock)]
pub trait PollEventSink: Send + Sync {
    /// Hand one JSON text frame to the sink.
    fn deliver(&self, message: &str) -> Result<(), PollEventSinkError>;
}
