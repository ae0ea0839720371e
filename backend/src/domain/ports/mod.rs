//! Domain ports for the hexagonal boundary.
//!
//! Driving ports (`PollCommand`, `PollQuery`, `PollSubscriptions`) are what
//! inbound adapters depend on. `PollEventSink` is the driven port the fan-out
//! pushes events through.

mod poll_command;
mod poll_event_sink;
mod poll_query;
mod poll_subscriptions;

pub use poll_command::PollCommand;
#[cfg(test)]
pub use poll_event_sink::MockPollEventSink;
pub use poll_event_sink::{PollEventSink, PollEventSinkError};
pub use poll_query::PollQuery;
pub use poll_subscriptions::PollSubscriptions;
