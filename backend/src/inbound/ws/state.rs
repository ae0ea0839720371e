//! Shared WebSocket adapter state.
//!
//! The upgrade handler depends on the subscription port rather than on the
//! store itself, so tests can observe registrations with a test double.

use std::sync::Arc;

use crate::domain::ports::PollSubscriptions;

/// Dependency bundle for WebSocket handlers.
#[derive(Clone)]
pub struct WsState {
    pub subscriptions: Arc<dyn PollSubscriptions>,
}

impl WsState {
    /// Construct state from explicit port implementations.
    pub fn new(subscriptions: Arc<dyn PollSubscriptions>) -> Self {
        Self { subscriptions }
    }
}
