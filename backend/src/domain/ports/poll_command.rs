//! Driving port for poll mutations.
//!
//! Inbound adapters call these operations; implementations apply the change
//! and notify subscribers before returning. The interface is synchronous
//! because the store never performs I/O.

use crate::domain::{Poll, PollDraft, PollId, PollStoreError};

/// Poll mutation use-cases.
pub trait PollCommand: Send + Sync {
    /// Validate and store a new poll, announcing it to subscribers.
    fn create_poll(&self, draft: PollDraft) -> Result<Poll, PollStoreError>;

    /// Count one ballot for `option_index` on an open poll.
    fn vote(&self, id: PollId, option_index: usize) -> Result<Poll, PollStoreError>;

    /// Close a poll. Closing an already closed poll returns it unchanged.
    fn close_poll(&self, id: PollId) -> Result<Poll, PollStoreError>;
}
