//! Inbound adapters translating external requests into poll store calls
//! while keeping framework details at the edge.
//!
//! REST handlers live under [`http`]; the live-update socket lives under
//! [`ws`].

pub mod http;
pub mod ws;
