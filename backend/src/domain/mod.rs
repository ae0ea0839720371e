//! Domain primitives, the poll store and its ports.
//!
//! Purpose: hold poll state and the rules for changing it, independent of any
//! transport. Inbound adapters talk to the store through the driving ports in
//! [`ports`]; live-update transports plug in through
//! [`ports::PollEventSink`].
//!
//! Public surface:
//! - `Poll` / `PollSummary`: full record and its public (vote-free) view.
//! - `PollStore`: the single in-memory owner of polls and subscribers.
//! - `PollEvent`: change notifications fanned out to subscribers.
//! - `Error` / `ErrorCode`: transport-agnostic error payload.

pub mod broadcast;
pub mod error;
pub mod poll;
pub mod poll_events;
pub mod poll_store;
pub mod ports;
pub mod trace_id;

pub use self::error::{Error, ErrorCode};
pub use self::poll::{
    MIN_POLL_OPTIONS, Poll, PollDraft, PollId, PollSummary, PollValidationError,
};
pub use self::poll_events::PollEvent;
pub use self::poll_store::{PollStore, PollStoreError};
pub use self::trace_id::TraceId;
