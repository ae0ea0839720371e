//! WebSocket inbound adapter streaming poll events to clients.
//!
//! Responsibilities:
//! - upgrade `GET /polls/live` and register a per-connection sink
//! - run the per-connection session (heartbeats, forwarding, teardown)
//! - keep WebSocket-specific concerns at the edge of the system

use std::sync::Arc;

use actix_web::web::{self, Payload};
use actix_web::{HttpRequest, HttpResponse, get};
use tokio::sync::mpsc;
use tracing::{debug, error};

use crate::domain::ports::PollEventSink;

mod session;
mod sink;

pub mod state;

pub use sink::ChannelSink;

/// Path of the live-update socket.
pub const LIVE_UPDATES_PATH: &str = "/polls/live";

/// Handle the WebSocket upgrade for the live-update endpoint.
///
/// The connection is subscribed before the handshake response is returned, so
/// every event emitted after the client sees the upgrade reaches it.
#[get("/polls/live")]
pub async fn ws_entry(
    state: web::Data<state::WsState>,
    req: HttpRequest,
    stream: Payload,
) -> actix_web::Result<HttpResponse> {
    let (response, session, messages) = actix_ws::handle(&req, stream).map_err(|err| {
        error!(error = %err, "WebSocket upgrade failed");
        err
    })?;

    let (tx, rx) = mpsc::unbounded_channel();
    let sink: Arc<dyn PollEventSink> = Arc::new(ChannelSink::new(tx));
    state.subscriptions.subscribe(Arc::clone(&sink));
    debug!(peer = ?req.peer_addr(), "live-update client subscribed");

    let subscriptions = Arc::clone(&state.subscriptions);
    actix_web::rt::spawn(async move {
        session::handle_ws_session(session, messages, rx).await;
        subscriptions.unsubscribe(&sink);
        debug!("live-update client unsubscribed");
    });

    Ok(response)
}
