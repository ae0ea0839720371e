//! In-memory poll store.
//!
//! The store is the only owner of poll state and of the subscriber registry.
//! A single mutex covers both: every operation locks once, applies its change
//! and, for mutations, broadcasts the resulting event before releasing the
//! lock. Events therefore leave in the same order the mutations were applied,
//! and a subscriber that re-reads a poll after an event sees at least the
//! state the event describes.
//!
//! Nothing here performs I/O. Sinks are expected to hand frames off without
//! blocking (see [`PollEventSink`]).

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};

use mockable::Clock;
use thiserror::Error;
use tracing::{info, warn};

use crate::domain::broadcast::Broadcaster;
use crate::domain::ports::{PollCommand, PollEventSink, PollQuery, PollSubscriptions};
use crate::domain::{Poll, PollDraft, PollEvent, PollId, PollSummary, PollValidationError};

/// Failures reported by store operations.
///
/// Each variant is local to the failing call; the store stays usable.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollStoreError {
    /// The input broke a poll rule.
    #[error(transparent)]
    Validation(#[from] PollValidationError),
    /// No poll has this identifier.
    #[error("poll {id} not found")]
    NotFound { id: PollId },
    /// The poll no longer accepts votes.
    #[error("poll {id} is closed")]
    Closed { id: PollId },
}

#[derive(Default)]
struct StoreState {
    polls: HashMap<PollId, Poll>,
    broadcaster: Broadcaster,
}

impl StoreState {
    fn poll_mut(&mut self, id: PollId) -> Result<&mut Poll, PollStoreError> {
        self.polls
            .get_mut(&id)
            .ok_or(PollStoreError::NotFound { id })
    }
}

/// Process-wide poll store shared by every adapter.
///
/// # Examples
/// ```
/// use std::sync::Arc;
///
/// use mockable::DefaultClock;
/// use quickpoll::domain::ports::{PollCommand, PollQuery};
/// use quickpoll::domain::{PollDraft, PollStore};
///
/// let store = PollStore::new(Arc::new(DefaultClock));
/// let poll = store
///     .create_poll(PollDraft::new("Best color?", ["Red", "Blue"]))
///     .expect("valid poll");
/// let voted = store.vote(poll.id(), 1).expect("open poll");
/// assert_eq!(voted.votes(), [0, 1]);
/// assert_eq!(store.list_polls().len(), 1);
/// ```
pub struct PollStore {
    state: Mutex<StoreState>,
    clock: Arc<dyn Clock>,
}

impl PollStore {
    /// Create an empty store stamping polls with `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            state: Mutex::new(StoreState::default()),
            clock,
        }
    }

    /// Number of polls ever created, open or closed.
    #[must_use]
    pub fn poll_count(&self) -> usize {
        self.lock().polls.len()
    }

    /// Number of currently registered live-update sinks.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.lock().broadcaster.len()
    }

    // Mutations are single in-place steps, so a panic elsewhere cannot leave
    // the map half-written; recover the guard instead of propagating poison.
    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap_or_else(|poisoned| {
            warn!("poll store lock was poisoned; recovering");
            poisoned.into_inner()
        })
    }
}

impl PollCommand for PollStore {
    fn create_poll(&self, draft: PollDraft) -> Result<Poll, PollStoreError> {
        let poll = Poll::open(PollId::random(), draft, self.clock.utc())?;

        let mut state = self.lock();
        state.polls.insert(poll.id(), poll.clone());
        state.broadcaster.broadcast(&PollEvent::NewPoll {
            poll: poll.summary(),
        });
        info!(poll_id = %poll.id(), options = poll.options().len(), "poll created");
        Ok(poll)
    }

    fn vote(&self, id: PollId, option_index: usize) -> Result<Poll, PollStoreError> {
        let mut state = self.lock();
        let poll = state.poll_mut(id)?;
        if poll.is_closed() {
            return Err(PollStoreError::Closed { id });
        }
        poll.record_vote(option_index)?;
        let updated = poll.clone();

        state.broadcaster.broadcast(&PollEvent::Vote {
            poll_id: id,
            votes: updated.votes().to_vec(),
        });
        Ok(updated)
    }

    fn close_poll(&self, id: PollId) -> Result<Poll, PollStoreError> {
        let mut state = self.lock();
        let poll = state.poll_mut(id)?;
        let transitioned = poll.close();
        let current = poll.clone();

        if transitioned {
            state.broadcaster.broadcast(&PollEvent::Closed { poll_id: id });
            info!(poll_id = %id, "poll closed");
        }
        Ok(current)
    }
}

impl PollQuery for PollStore {
    fn list_polls(&self) -> Vec<PollSummary> {
        self.lock()
            .polls
            .values()
            .filter(|poll| !poll.is_closed())
            .map(Poll::summary)
            .collect()
    }

    fn get_poll(&self, id: PollId) -> Result<Poll, PollStoreError> {
        self.lock()
            .polls
            .get(&id)
            .cloned()
            .ok_or(PollStoreError::NotFound { id })
    }
}

impl PollSubscriptions for PollStore {
    fn subscribe(&self, sink: Arc<dyn PollEventSink>) {
        self.lock().broadcaster.subscribe(sink);
    }

    fn unsubscribe(&self, sink: &Arc<dyn PollEventSink>) {
        self.lock().broadcaster.unsubscribe(sink);
    }
}

#[cfg(test)]
#[path = "poll_store_tests.rs"]
mod tests;
