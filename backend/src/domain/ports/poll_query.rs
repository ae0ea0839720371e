//! Driving port for poll reads.

use crate::domain::{Poll, PollId, PollStoreError, PollSummary};

/// Read-only poll use-cases.
pub trait PollQuery: Send + Sync {
    /// Open polls in no particular order, without results.
    fn list_polls(&self) -> Vec<PollSummary>;

    /// Full record, results included.
    fn get_poll(&self, id: PollId) -> Result<Poll, PollStoreError>;
}
