//! Driving port for live-update registration.

use std::sync::Arc;

use crate::domain::ports::PollEventSink;

/// Registration of live-update sinks.
///
/// Sinks are compared by identity (`Arc::ptr_eq`), so the same handle must be
/// passed to [`PollSubscriptions::unsubscribe`] that was passed to
/// [`PollSubscriptions::subscribe`].
pub trait PollSubscriptions: Send + Sync {
    /// Register a sink. Registering the same sink twice has no effect.
    fn subscribe(&self, sink: Arc<dyn PollEventSink>);

    /// Remove a sink. Unknown sinks are ignored.
    fn unsubscribe(&self, sink: &Arc<dyn PollEventSink>);
}
